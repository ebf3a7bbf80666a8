use anyhow::Result;
use clap::Parser;
use phraserec::keys::CrlfWriter;
use phraserec::{cli::Args, phrases, runner, CaptureConfig, SoxRecorder, TerminalKeys};
use tracing::info;

fn main() -> Result<()> {
    // Raw mode stops translating `\n`, so log lines go through a writer
    // that emits `\r\n` and stays off the prompt line on stdout.
    tracing_subscriber::fmt()
        .with_writer(|| CrlfWriter(std::io::stderr()))
        .init();

    let args = Args::parse();

    let mut config = CaptureConfig::load(&args.config)?;
    args.apply_to(&mut config);
    config.validate()?;

    let phrase_list: Vec<String> = if args.unit {
        println!("The following recordings are less than {} seconds of speech.",
            config.max_duration_secs);
        phrases::UNIT_PHRASES.iter().map(|s| s.to_string()).collect()
    } else if let Some(path) = &args.file {
        phrases::load_file(path)?
    } else {
        args.phrases.clone()
    };

    if phrase_list.is_empty() {
        println!("No phrases to record");
        return Ok(());
    }

    info!(
        "capturing {} phrase(s) at {} bit / {} ch / {} Hz",
        phrase_list.len(),
        config.audio.bits,
        config.audio.channels,
        config.audio.rate
    );

    let mut keys = TerminalKeys::new()?;
    let mut recorder = SoxRecorder::new(&config);

    let report = runner::run(&phrase_list, &config, &mut keys, &mut recorder);

    drop(keys); // restore the terminal before the summary

    println!("{} sample(s) recorded", report.accepted.len());
    for (phrase, reason) in &report.failed {
        eprintln!("failed \"{}\": {}", phrase, reason);
    }

    Ok(())
}
