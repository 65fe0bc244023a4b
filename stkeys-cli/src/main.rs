use chrono::Datelike;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use stkeys_cli::{Error, match_line};
use stkeys_engine::{CANDIDATES_PER_YEAR, FIRST_YEAR, KeyspaceScan, LAST_YEAR, total_candidates};

#[derive(Parser, Debug)]
#[command(name = "stkeys")]
#[command(about = "Recover SpeedTouch default wireless keys from the SSID tail")]
struct Args {
    /// Last six characters of the broadcast SSID (e.g. EA6601 for SpeedTouchEA6601)
    ssid_tail: String,

    /// Newest manufacture year to try (default: the current year)
    #[arg(long)]
    year: Option<u16>,

    /// Disable progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    if args.ssid_tail.is_empty() {
        return Err(Error::EmptySsidTail);
    }

    let newest_year = args.year.unwrap_or_else(|| chrono::Local::now().year() as u16);
    if newest_year < FIRST_YEAR {
        return Err(Error::YearBeforeFirst { year: newest_year });
    }
    if newest_year > LAST_YEAR {
        return Err(Error::YearAfterLast { year: newest_year });
    }

    println!(
        "Scanning serial years {} down to {} for SSID tail '{}', newest first",
        newest_year, FIRST_YEAR, args.ssid_tail
    );

    let progress_bar = if !args.no_progress {
        let pb = ProgressBar::new(total_candidates(newest_year));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec} serials/s)")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut matches = 0u64;
    for year in (FIRST_YEAR..=newest_year).rev() {
        emit(progress_bar.as_ref(), format!("Starting the year {}", year));
        for record in KeyspaceScan::single_year(&args.ssid_tail, year) {
            matches += 1;
            emit(progress_bar.as_ref(), match_line(&record));
        }
        if let Some(pb) = &progress_bar {
            pb.inc(CANDIDATES_PER_YEAR);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("done");
    }
    println!("Scan complete: {} possible key(s) found", matches);

    Ok(())
}

/// Routes user-facing lines above the progress bar when one is drawn.
fn emit(progress_bar: Option<&ProgressBar>, line: String) {
    match progress_bar {
        Some(pb) => pb.println(line),
        None => println!("{}", line),
    }
}
