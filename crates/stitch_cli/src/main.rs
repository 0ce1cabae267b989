mod args;
mod types;

use std::{fs, path::Path, process::ExitCode, time::Instant};

use ansi_term::Colour;
use anyhow::Context;
use args::{EnhanceArgs, InputArgs, OutputArgs};
use clap::Parser;
use log::LevelFilter;

use stitch::{BundleOutput, Bundler, BundlerOptions};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  enhance: EnhanceArgs,
}

fn init_logger(verbose: u8) {
  let level = match verbose {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };
  env_logger::Builder::new().filter_level(level).parse_default_env().init();
}

fn read_config(path: &Path) -> anyhow::Result<BundlerOptions> {
  let content =
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  serde_json::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}

/// Layers the flags over the config file.
fn bundler_options(args: Commands) -> anyhow::Result<BundlerOptions> {
  let InputArgs { entries, input, cwd, root, base, external, config } = args.input;
  let options = match &config {
    Some(path) => read_config(path)?,
    None => BundlerOptions::default(),
  };

  let mut entries = entries;
  entries.extend(input.unwrap_or_default());
  let input = (!entries.is_empty()).then(|| entries.into_iter().map(Into::into).collect());

  Ok(BundlerOptions {
    input: input.or(options.input),
    cwd: cwd.or(options.cwd),
    root: root.or(options.root),
    base: base.or(options.base),
    external: external.or(options.external),
    file: args.output.file.or(options.file),
    loader: args.enhance.loader.map(Into::into).or(options.loader),
    bare: if args.enhance.bare { Some(true) } else { options.bare },
  })
}

fn print_modules(output: &BundleOutput) {
  let dim = Colour::White.dimmed();

  for url in &output.modules {
    eprintln!("{} {}", dim.paint("module │"), Colour::Cyan.paint(url.as_str()));
  }
  let size = format!("{:.2} kB", output.code.len() as f64 / 1024.0);
  eprintln!("{}{}", dim.paint("bundle │ size: "), size);
}

fn main() -> ExitCode {
  let args = Commands::parse();
  init_logger(args.enhance.verbose);

  let options = match bundler_options(args) {
    Ok(options) => options,
    Err(error) => {
      eprintln!("{} {:#}", Colour::Red.paint("Error:"), error);
      return ExitCode::FAILURE;
    }
  };
  let to_stdout = options.file.is_none();
  let bundler = Bundler::new(options);

  let start = Instant::now();
  let result = if to_stdout { bundler.bundle() } else { bundler.write() };
  match result {
    Ok(output) => {
      for warning in &output.warnings {
        eprintln!("{} {}", Colour::Yellow.paint("Warning:"), warning);
      }

      if to_stdout {
        print!("{}", output.code);
      }
      print_modules(&output);

      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      eprintln!(
        "\n{} Finished in {}",
        Colour::Green.paint("✔"),
        Colour::White.bold().paint(elapsed)
      );
      ExitCode::SUCCESS
    }
    Err(errors) => {
      for error in &*errors {
        eprintln!("{} {:#}", Colour::Red.paint("Error:"), error);
      }
      ExitCode::FAILURE
    }
  }
}
