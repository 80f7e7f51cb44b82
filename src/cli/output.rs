//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, WikiRaiderArgs};
use crate::dump::DumpListing;
use crate::error::Result;
use crate::pipeline::RunSummary;

/// Result structure for the `list` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct DumpListResult {
    pub search: Option<String>,
    pub dumps: Vec<DumpListing>,
}

/// Results that know how to print themselves for people.
pub trait HumanOutput {
    fn lines(&self) -> Vec<String>;
}

impl HumanOutput for DumpListResult {
    fn lines(&self) -> Vec<String> {
        if self.dumps.is_empty() {
            return vec![match &self.search {
                Some(search) => format!("No completed dump found for `{search}`"),
                None => "No completed dumps found".to_string(),
            }];
        }

        self.dumps
            .iter()
            .map(|dump| format!("Name: {}, URL: {}", dump.name, dump.url))
            .collect()
    }
}

impl HumanOutput for RunSummary {
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Wiki:           {}", self.wiki_name),
            format!("XML files:      {}", self.segments),
            format!("Pages queued:   {}", self.pages_enqueued),
            format!("Pages failed:   {}", self.pages_failed),
            format!("Unique words:   {}", self.word_count),
        ];
        if !self.sample.is_empty() {
            lines.push(format!("Sample:         {}", self.sample.join(", ")));
        }
        lines.push(match &self.output {
            Some(path) => format!("Wordlist:       {}", path.display()),
            None => "Wordlist:       not written (no words found)".to_string(),
        });
        lines
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &WikiRaiderArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &WikiRaiderArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }
    for line in result.lines() {
        println!("{line}");
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
