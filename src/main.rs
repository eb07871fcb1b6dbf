// Command line front end: validate a TD3 MRZ line and print the verdict.
// Exits 0 whenever the line is well formed, even if the document is invalid.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use luppa_mrz::{
    models::{CalendarDate, ValidationIssueType, ValidationVerdict},
    processing::TextOcrProvider,
    utils::PassportError,
    PassportValidator,
};

#[derive(Parser, Debug)]
#[command(name = "mrzcheck", version, about = "Validate the second line of a TD3 passport MRZ")]
struct Cli {
    /// MRZ line; read from --file or standard input when omitted
    #[arg(conflicts_with = "file")]
    line: Option<String>,

    /// Read recognized text from a file; the last non-empty line is used
    #[arg(long)]
    file: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) for the expiry check, defaults to today
    #[arg(long, env = "MRZ_TODAY")]
    today: Option<String>,

    #[arg(long, help = "Output machine-readable JSON")]
    json: bool,

    /// Passport image to run through Tesseract
    #[cfg(feature = "tesseract")]
    #[arg(long, conflicts_with_all = ["line", "file"])]
    image: Option<PathBuf>,

    /// Tesseract language
    #[cfg(feature = "tesseract")]
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Tesseract data directory
    #[cfg(feature = "tesseract")]
    #[arg(long, env = "TESSDATA_PREFIX")]
    tessdata: Option<String>,
}

fn print_detailed_report(verdict: &ValidationVerdict) {
    let status = |valid: bool| if valid { "PASSED" } else { "FAILED" };

    println!("===============================================");
    println!("      MRZ VALIDATION REPORT");
    println!("===============================================\n");

    println!("PASSPORT INFORMATION:");
    println!("  Passport Number: {}", verdict.passport_number);
    println!("  Personal Number: {}", verdict.personal_number);
    println!("  Date of Birth: {}", verdict.date_of_birth);
    println!("  Date of Expiry: {}", verdict.date_of_expiry);

    println!("\nVALIDATION STEPS:");
    println!("  1. Passport Number Check Digit: {}", status(verdict.passport_number_check_valid));
    println!("  2. Date of Birth Check Digit: {}", status(verdict.date_of_birth_check_valid));
    println!("  3. Date of Expiry Check Digit: {}", status(verdict.date_of_expiry_check_valid));
    println!("  4. Personal Number Check Digit: {}", status(verdict.personal_number_check_valid));
    println!("  5. Composite Check Digit: {}", status(verdict.composite_check_valid));
    println!("  6. Not Expired: {}", status(verdict.not_expired));

    if !verdict.issues.is_empty() {
        println!("\nISSUES FOUND:");
        for issue in &verdict.issues {
            println!(
                "  - [{}] {}",
                match issue.issue_type {
                    ValidationIssueType::Mrz => "MRZ",
                    ValidationIssueType::Expiry => "EXPIRY",
                },
                issue.message
            );
        }
    }

    println!(
        "\nPassport validation result: {}",
        if verdict.is_valid { "VALID" } else { "INVALID" }
    );
}

fn reference_date(cli: &Cli) -> Result<CalendarDate, PassportError> {
    match &cli.today {
        Some(text) => CalendarDate::parse_iso(text)
            .ok_or_else(|| PassportError::InvalidDate(format!("expected YYYY-MM-DD, got {:?}", text))),
        None => Ok(CalendarDate::today()),
    }
}

fn read_text(cli: &Cli) -> Result<String, PassportError> {
    if let Some(line) = &cli.line {
        return Ok(line.clone());
    }
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path).map_err(|e| {
            PassportError::IoError(format!("Failed to read {}: {}", path.display(), e))
        });
    }

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

#[cfg(feature = "tesseract")]
fn validate_image(
    cli: &Cli,
    now: CalendarDate,
) -> Option<Result<ValidationVerdict, PassportError>> {
    use luppa_mrz::processing::TesseractOcrProvider;

    let path = cli.image.as_ref()?;
    let result = std::fs::read(path)
        .map_err(|e| PassportError::IoError(format!("Failed to read {}: {}", path.display(), e)))
        .and_then(|image_data| {
            let provider = TesseractOcrProvider::new(cli.tessdata.clone(), cli.lang.clone());
            PassportValidator::new(provider).validate_on(&image_data, now)
        });
    Some(result)
}

#[cfg(not(feature = "tesseract"))]
fn validate_image(
    _cli: &Cli,
    _now: CalendarDate,
) -> Option<Result<ValidationVerdict, PassportError>> {
    None
}

fn run(cli: &Cli) -> Result<ValidationVerdict, PassportError> {
    let now = reference_date(cli)?;

    if let Some(result) = validate_image(cli, now) {
        return result;
    }

    let text = read_text(cli)?;
    PassportValidator::new(TextOcrProvider::new(text)).validate_on(&[], now)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(verdict) => {
            if cli.json {
                match serde_json::to_string_pretty(&verdict) {
                    Ok(json) => println!("{}", json),
                    Err(err) => {
                        eprintln!("Error serializing verdict: {}", err);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_detailed_report(&verdict);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error validating passport: {}", err);
            ExitCode::FAILURE
        }
    }
}
