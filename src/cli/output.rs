use crate::Correction;
use colored::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per word, colored when enabled
    #[default]
    Text,
    /// Pretty-printed JSON array
    Json,
}

#[derive(Debug, Serialize)]
struct JsonCorrection<'a> {
    word: &'a str,
    status: &'static str,
    suggestions: &'a [String],
}

fn status(correction: &Correction) -> &'static str {
    match correction {
        Correction::Correct => "correct",
        Correction::NoCandidates => "no-suggestions",
        Correction::Suggestions(_) => "suggestions",
    }
}

pub fn print_corrections(
    results: &[(String, Correction)],
    colored_output: bool,
    format: OutputFormat,
) -> serde_json::Result<()> {
    match format {
        OutputFormat::Text => {
            for (word, correction) in results {
                println!("{}", render_text(word, correction, colored_output));
            }
        }
        OutputFormat::Json => println!("{}", render_json(results)?),
    }
    Ok(())
}

pub fn render_text(word: &str, correction: &Correction, colored: bool) -> String {
    match correction {
        Correction::Correct => {
            if colored {
                format!("{} {}", word.bold(), "✓ correct".green())
            } else {
                format!("{} ✓ correct", word)
            }
        }
        Correction::NoCandidates => {
            if colored {
                format!("{} {}", word.red().bold(), "no suggestions".dimmed())
            } else {
                format!("{} no suggestions", word)
            }
        }
        Correction::Suggestions(words) => {
            if colored {
                let suggestions = words
                    .iter()
                    .map(|s| s.green().to_string())
                    .collect::<Vec<_>>()
                    .join(&", ".dimmed().to_string());
                format!("{} {} {}", word.red().bold(), "→".dimmed(), suggestions)
            } else {
                format!("{} → {}", word, words.join(", "))
            }
        }
    }
}

pub fn render_json(results: &[(String, Correction)]) -> serde_json::Result<String> {
    let output: Vec<JsonCorrection> = results
        .iter()
        .map(|(word, correction)| JsonCorrection {
            word,
            status: status(correction),
            suggestions: correction.suggestions(),
        })
        .collect();

    serde_json::to_string_pretty(&output)
}

pub fn print_summary(checked: usize, misspelled: usize, colored: bool) {
    println!();
    if misspelled == 0 {
        if colored {
            println!("{}", "✓ All words are correct!".green().bold());
        } else {
            println!("✓ All words are correct!");
        }
    } else {
        let word = if checked == 1 { "word" } else { "words" };
        if colored {
            println!(
                "{} {} of {} {} not in the dictionary",
                "✗".red().bold(),
                misspelled.to_string().red().bold(),
                checked,
                word
            );
        } else {
            println!("✗ {} of {} {} not in the dictionary", misspelled, checked, word);
        }
    }
}
