use super::{connect, fail};
use crate::context::AppContext;
use crate::format::{Formattable, OutputFormat, format_output};
use libdockup::ImageInfo;
use tabled::{Table, Tabled, settings::Style};
use tracing::debug;

/// One label in the pretty inspect output
#[derive(Debug, Tabled)]
struct LabelRow {
    #[tabled(rename = "KEY")]
    key: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

impl Formattable for ImageInfo {
    fn format_pretty(&self) -> String {
        let mut output = format!("ID: {}\n", self.id);

        output.push_str("Labels:");
        if self.labels.is_empty() {
            output.push_str(" (none)\n");
        } else {
            let mut rows: Vec<LabelRow> = self
                .labels
                .iter()
                .map(|(key, value)| LabelRow {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect();
            rows.sort_by(|a, b| a.key.cmp(&b.key));

            output.push('\n');
            let table = Table::new(&rows).with(Style::empty()).to_string();
            for line in table.lines() {
                output.push_str(&format!("  {}\n", line.trim_end()));
            }
        }

        output.push_str("Env:");
        if self.env.is_empty() {
            output.push_str(" (none)\n");
        } else {
            output.push('\n');
            for entry in &self.env {
                output.push_str(&format!("  {}\n", entry));
            }
        }

        output
    }
}

/// Handle the inspect command
pub async fn handle_inspect(ctx: &AppContext, image: &str, format: OutputFormat) {
    debug!(image, host = ?ctx.config.engine.host, "inspecting image");
    let provisioner = connect(ctx);

    let info = match provisioner.inspect_image(image).await {
        Ok(info) => info,
        Err(e) => fail(ctx, &e),
    };

    match format_output(&info, format) {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => {
            ctx.formatter().error(&e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
