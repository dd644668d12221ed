use std::{env, fs, process};

use merge3_text::{line_diff, merge3};

/// Merges three versions of a file: base, mine, and theirs.
/// A trivial take on git merge-file (https://git-scm.com/docs/git-merge-file)
///
/// Run it with:
/// `cargo run --example merge-file base.txt my.txt their.txt [output_file.txt]`
fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 4 || args.len() > 5 {
        eprintln!("Usage: merge-file <base> <mine> <theirs> [output]");
        process::exit(1);
    }

    let base_file = &args[1];
    let mine_file = &args[2];
    let theirs_file = &args[3];
    let output_file = args.get(4);

    let base_content = read_or_exit(base_file);
    let mine_content = read_or_exit(mine_file);
    let theirs_content = read_or_exit(theirs_file);

    let merged_content = merge3(&line_diff, &base_content, &mine_content, &theirs_content)
        .unwrap_or_else(|error| {
            eprintln!("Merge failed: {error}");
            process::exit(1);
        });

    if let Some(output_path) = output_file {
        if let Err(error) = fs::write(output_path, merged_content) {
            eprintln!("Error writing to {output_path}: {error}");
            process::exit(1);
        }
    } else {
        print!("{merged_content}");
    }
}

fn read_or_exit(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|error| {
        eprintln!("Error reading {path}: {error}");
        process::exit(1);
    })
}
