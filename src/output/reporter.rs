use super::{add_file_extension, OutputFormat};
use crate::committers::RankedCommitter;
use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;
use serde_json::json;
use std::fs;
use tracing::info;

pub struct Reporter {
    format: OutputFormat,
    output_path: Option<String>,
}

impl Reporter {
    pub fn new(format: &str, output_path: Option<&str>) -> Self {
        let format = OutputFormat::from(format);
        let output_path = output_path.map(|path| add_file_extension(path, &format));

        Self {
            format,
            output_path,
        }
    }

    pub fn report(&self, domains: &[String], rows: &[RankedCommitter]) -> Result<()> {
        match self.format {
            OutputFormat::Text => match &self.output_path {
                Some(path) => self.save(path, Self::render_text(rows))?,
                None => Self::print_leaderboard(rows),
            },
            OutputFormat::Json => {
                let content = Self::render_json(domains, rows)?;
                match &self.output_path {
                    Some(path) => self.save(path, content)?,
                    None => println!("{}", content),
                }
            }
        }
        Ok(())
    }

    fn save(&self, path: &str, content: String) -> Result<()> {
        fs::write(path, content).with_context(|| format!("Failed to write report to {}", path))?;
        info!("Report saved to {}", path);
        Ok(())
    }

    fn print_leaderboard(rows: &[RankedCommitter]) {
        if rows.is_empty() {
            println!(
                "{}",
                "No committers matched the configured domains".yellow()
            );
            return;
        }

        for row in rows {
            println!(
                "{} {} {}",
                format!("Top{}:", row.rank).bright_cyan().bold(),
                row.author,
                format!("({} commits)", row.commits).bright_white()
            );
        }
    }

    fn render_text(rows: &[RankedCommitter]) -> String {
        let mut out = String::new();
        for row in rows {
            out.push_str(&format!("Top{}:{}:{}\n", row.rank, row.author, row.commits));
        }
        out
    }

    fn render_json(domains: &[String], rows: &[RankedCommitter]) -> Result<String> {
        let document = json!({
            "generated_at": Utc::now().to_rfc3339(),
            "domains": domains,
            "total_ranked": rows.len(),
            "ranking": rows,
        });
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
