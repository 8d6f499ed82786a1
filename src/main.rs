//! ILDA codec CLI - Inspect ILDA files and build them from JSON animations.

use std::fs;
use std::path::PathBuf;

use ilda_codec::{
    AnimationDocument, IldaFile, SectionConverter,
    animation::{SectionSummary, strokes},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("--example") => print_example_document(),
        Some("info") if args.len() == 3 => info(PathBuf::from(&args[2])),
        Some("convert") if args.len() == 4 => {
            convert(PathBuf::from(&args[2]), PathBuf::from(&args[3]))
        }
        _ => {
            eprintln!("Usage: {} <command>", args[0]);
            eprintln!();
            eprintln!("Commands:");
            eprintln!("  info <file.ild>                    Print every section header");
            eprintln!("  convert <animation.json> <out.ild> Build an ILDA file from an animation");
            eprintln!("  --example                          Print an example animation document");
            std::process::exit(1);
        }
    }
}

fn info(path: PathBuf) {
    let report = IldaFile::load(&path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path.display(), e);
        std::process::exit(1);
    });

    for (index, section) in report.sections.iter().enumerate() {
        println!("{}", SectionSummary { index, section });
        if let Ok(strokes) = strokes(section) {
            println!("visible strokes    : {}", strokes.len());
        }
        println!();
    }

    println!("{}", report);
    if !report.is_clean() {
        std::process::exit(2);
    }
}

fn convert(input: PathBuf, output: PathBuf) {
    let doc_str = fs::read_to_string(&input).unwrap_or_else(|e| {
        eprintln!("Error reading animation file: {}", e);
        std::process::exit(1);
    });

    let doc: AnimationDocument = serde_json::from_str(&doc_str).unwrap_or_else(|e| {
        eprintln!("Error parsing animation: {}", e);
        std::process::exit(1);
    });

    let authored = doc.frames.len();
    let converter = SectionConverter::from_document(doc).unwrap_or_else(|e| {
        eprintln!("Invalid converter config: {}", e);
        std::process::exit(1);
    });
    let file = converter.to_file().unwrap_or_else(|e| {
        eprintln!("Error converting animation: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = file.save(&output) {
        eprintln!("Error writing {}: {}", output.display(), e);
        std::process::exit(1);
    }

    println!(
        "Wrote {} sections ({} authored frames, {} total) to {}",
        file.sections.len(),
        authored,
        converter.max_frame() as u32 + 1,
        output.display()
    );
}

fn print_example_document() {
    let doc = AnimationDocument::example();
    match serde_json::to_string_pretty(&doc) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing example: {}", e);
            std::process::exit(1);
        }
    }
}
