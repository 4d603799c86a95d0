use anyhow::Context;
use minic::{Args, Checker};
use rustyline::Editor;
use std::{fs, path::PathBuf, process};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::new();
    let mut c = Checker::new().show_tokens(args.tokens);
    if let Some(file_name) = args.file_name {
        run_file(&mut c, file_name)
    } else {
        run_prompt(&mut c);
        Ok(())
    }
}

fn run_file(c: &mut Checker, file_name: PathBuf) -> anyhow::Result<()> {
    let source = fs::read_to_string(&file_name)
        .with_context(|| format!("could not read '{}'", file_name.display()))?;
    if c.run(&source).is_err() {
        process::exit(1);
    }
    Ok(())
}

/// Collects lines until an empty one, then checks them as one unit.
fn run_prompt(c: &mut Checker) {
    let mut editor = Editor::<()>::new();
    let mut buf = String::new();
    loop {
        let prompt = if buf.is_empty() { "$ " } else { ". " };
        match editor.readline(prompt) {
            Ok(line) if line.trim().is_empty() => {
                if !buf.is_empty() {
                    c.run(&buf).ok();
                    buf.clear();
                }
            }
            Ok(line) => {
                editor.add_history_entry(line.as_str());
                buf.push_str(&line);
                buf.push('\n');
            }
            Err(_) => break,
        }
    }

    if !buf.is_empty() {
        c.run(&buf).ok();
    }
}
