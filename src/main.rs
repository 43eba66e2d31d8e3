//! Command-line interface for syntagma
//!
//! Usage:
//!   syntagma [OPTIONS] <TAGGED TEXT>
//!   echo "the/DT dog/NN barks/VBZ" | syntagma
//!
//! Options:
//!   -t, --tsv      Input is TSV (one "token<TAB>tag" pair per line)
//!   -r, --raw      Stop after reconstruction (skip grammatical correction)
//!   -j, --json     Output the full analysis record as JSON
//!   -v, --verbose  Print each analysis step
//!   -h, --help     Show help

use std::env;
use std::io::{self, BufRead};

use syntagma::{analyze, grammar, parse_tagged, parse_tsv, SyntacticAnalysis, TaggedToken};

fn print_help() {
    eprintln!(
        r#"syntagma - rule-based sentence reconstruction over POS-tagged text

USAGE:
    syntagma [OPTIONS] [TAGGED TEXT]
    echo "the/DT dog/NN barks/VBZ" | syntagma

OPTIONS:
    -t, --tsv      Input is TSV (one "token<TAB>tag" pair per line)
    -r, --raw      Stop after reconstruction (skip grammatical correction)
    -j, --json     Output the full analysis record as JSON
    -v, --verbose  Print each analysis step
    -h, --help     Show this help message

EXAMPLES:
    syntagma "quickly/RB the/DT dog/NN barks/VBZ"
    syntagma -j "the/DT dogs/NNS is/VBZ loud/JJ"
    printf 'the\tDT\ndog\tNN\nbarks\tVBZ\n' | syntagma -t
"#
    );
}

fn print_step(step: usize, name: &str, body: &str) {
    println!("\n[Step {}] {}", step, name);
    println!("{}", "-".repeat(60));
    println!("{}", body);
}

fn print_analysis(result: &SyntacticAnalysis) {
    print_step(0, "Original Sentence", &result.original);

    let problems = if result.problems_fixed.is_empty() {
        "No problems detected".to_string()
    } else {
        result
            .problems_fixed
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    };
    print_step(1, "Problems Detected & Fixed", &problems);

    let phrases = result
        .noun_phrases
        .iter()
        .map(|np| format!("({}, {}) {}", np.start, np.end, np.tokens.join(" ")))
        .collect::<Vec<_>>()
        .join("\n");
    print_step(2, "Noun Phrases", if phrases.is_empty() { "None found" } else { &phrases });

    let groups = result
        .verb_groups
        .iter()
        .map(|g| {
            format!(
                "({}, {}) {} [{}]",
                g.start,
                g.end,
                g.tokens.join(" "),
                if g.is_main { "MAIN" } else { "AUX" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    print_step(3, "Verb Groups", if groups.is_empty() { "None found" } else { &groups });

    print_step(
        4,
        "Clause Structure",
        &format!(
            "main: {:?}\ndependent: {:?}\nsubordinators: {:?}",
            result.clauses.main, result.clauses.dependent, result.clauses.subordinator_positions
        ),
    );

    let svo = &result.svo_components;
    print_step(
        5,
        "S-V-O Components",
        &format!(
            "subject: {:?}\nverb: {:?}\nobject: {:?}\nprepositional phrases: {}\nother: {:?}",
            svo.subject,
            svo.verb,
            svo.object,
            svo.prepositional_phrases.len(),
            svo.other
        ),
    );

    print_step(6, "Reconstructed Sentence", &result.reconstructed);
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut tsv_mode = false;
    let mut raw_mode = false;
    let mut json_output = false;
    let mut verbose = false;
    let mut text: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-t" | "--tsv" => tsv_mode = true,
            "-r" | "--raw" => raw_mode = true,
            "-j" | "--json" => json_output = true,
            "-v" | "--verbose" => verbose = true,
            arg if !arg.starts_with('-') => text = Some(arg.to_string()),
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Read from stdin if no text provided
    let input_text = if let Some(t) = text {
        t
    } else {
        let stdin = io::stdin();
        let mut lines = Vec::new();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => lines.push(l),
                Err(e) => {
                    eprintln!("Error reading stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
        lines.join("\n")
    };

    let parsed = if tsv_mode {
        parse_tsv(&input_text)
    } else {
        parse_tagged(&input_text)
    };
    let tags: Vec<TaggedToken> = match parsed {
        Ok(tags) => tags,
        Err(e) => {
            eprintln!("Error parsing input: {}", e);
            std::process::exit(1);
        }
    };

    let result = analyze(&tags);

    if verbose {
        print_analysis(&result);
    }

    let corrected = if raw_mode {
        None
    } else {
        Some(grammar::correct(&result.reconstructed, &tags, Some(&result)))
    };

    if verbose {
        if let Some(corrected) = &corrected {
            print_step(7, "Corrected Sentence", corrected);
        }
    }

    if json_output {
        let output = serde_json::json!({
            "analysis": &result,
            "corrected": &corrected,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing to JSON: {}", e);
                std::process::exit(1);
            }
        }
    } else if !verbose {
        match corrected {
            Some(corrected) => println!("{}", corrected),
            None => println!("{}", result.reconstructed),
        }
    }
}
