//! A CLI for desugaring C# files.

use csharp_pipeline::{Config, Severity, VecSink};
use std::process::ExitCode;

fn main() -> ExitCode {
  let args = match get_args() {
    Err(e) => {
      println!("error parsing args: {e}");
      return ExitCode::FAILURE;
    }
    Ok(None) => return ExitCode::SUCCESS,
    Ok(Some(x)) => x,
  };
  let quiet = args.quiet;
  let n = run(args);
  if n == 0 {
    ExitCode::SUCCESS
  } else {
    if !quiet {
      let s = if n == 1 { "" } else { "s" };
      eprintln!("{n} error{s}");
    }
    ExitCode::FAILURE
  }
}

struct Args {
  config: Config,
  types: Option<std::ffi::OsString>,
  write: bool,
  quiet: bool,
  files: Vec<std::ffi::OsString>,
}

fn get_args() -> Result<Option<Args>, pico_args::Error> {
  env_logger::init();
  let mut args = pico_args::Arguments::from_env();
  if args.contains(["-h", "--help"]) {
    println!("usage:");
    println!("  cs-desugar [<option>...] <file>...");
    println!();
    println!("options:");
    println!("  -h, --help");
    println!("    show this help");
    println!("  -q, --quiet");
    println!("    emit no diagnostics");
    println!("  --no-optional-chain");
    println!("    leave `?.`, `?[` and `??` as they are");
    println!("  --no-initializer");
    println!("    leave object initializers as they are");
    println!("  --strip-comments");
    println!("    drop comments in object initializers instead of moving them");
    println!("  --short-types");
    println!("    write resolved types without namespaces");
    println!("  --types <file>");
    println!("    read type information from <file>, with lines like");
    println!("      type <expr> : <type>");
    println!("      params <callee> : <name>, <name>");
    println!("  --write");
    println!("    rewrite the files in place instead of printing them");
    println!();
    return Ok(None);
  }
  let config = Config {
    optional_chain: !args.contains("--no-optional-chain"),
    initializer: !args.contains("--no-initializer"),
    preserve_trivia: !args.contains("--strip-comments"),
    short_type_names: args.contains("--short-types"),
  };
  let types = args.opt_value_from_os_str("--types", |s| Ok::<_, std::convert::Infallible>(s.to_owned()))?;
  let write = args.contains("--write");
  let quiet = args.contains(["-q", "--quiet"]);
  let files = args.finish();
  Ok(Some(Args { config, types, write, quiet, files }))
}

fn run(args: Args) -> usize {
  let types = match &args.types {
    None => csharp_ty::Table::default(),
    Some(path) => {
      let contents = match std::fs::read_to_string(path) {
        Ok(x) => x,
        Err(e) => {
          if !args.quiet {
            eprintln!("{}: couldn't read path: {e}", path.to_string_lossy());
          }
          return 1;
        }
      };
      match contents.parse::<csharp_ty::Table>() {
        Ok(x) => x,
        Err(e) => {
          if !args.quiet {
            eprintln!("{}:{e}", path.to_string_lossy());
          }
          return 1;
        }
      }
    }
  };
  log::info!("{} type facts", types.len());
  let mut ret = 0usize;
  for arg in &args.files {
    let Some(arg) = arg.to_str() else {
      if !args.quiet {
        eprintln!("{}: not valid UTF-8", arg.to_string_lossy());
      }
      ret += 1;
      continue;
    };
    let contents = match std::fs::read_to_string(arg) {
      Ok(x) => x,
      Err(e) => {
        if !args.quiet {
          eprintln!("{arg}: couldn't read path: {e}");
        }
        ret += 1;
        continue;
      }
    };
    let mut sink = VecSink::default();
    let out = match csharp_pipeline::run(&contents, &types, &args.config, &mut sink) {
      Ok(x) => x,
      Err(e) => {
        if !args.quiet {
          eprintln!("{arg}:{e}");
        }
        ret += 1;
        continue;
      }
    };
    if !args.quiet {
      for event in sink.events.iter().filter(|e| e.severity == Severity::Warning) {
        let at = event.at.map(|at| format!("{at}:")).unwrap_or_default();
        let pass = event.pass.map(|p| format!(" {p}:")).unwrap_or_default();
        eprintln!("{arg}:{at} warning:{pass} {}", event.message);
      }
    }
    if args.write {
      if out.changed {
        if let Err(e) = std::fs::write(arg, out.text.as_bytes()) {
          if !args.quiet {
            eprintln!("{arg}: couldn't write path: {e}");
          }
          ret += 1;
        }
      }
    } else {
      print!("{}", out.text);
    }
  }
  ret
}
