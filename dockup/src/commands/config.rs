use super::fail;
use crate::config;
use crate::context::AppContext;
use crate::format::{Formattable, OutputFormat, format_output};
use libdockup::Config;

/// Implement Formattable for Config to enable output formatting
impl Formattable for Config {
    fn format_pretty(&self) -> String {
        let mut output = format!(
            "[engine]\nhost = {}\ntimeout = {}s\n",
            self.engine.host.as_deref().unwrap_or("(local default)"),
            self.engine.timeout
        );

        output.push_str(&format!("\n[pull]\ntimeout = {}s\n", self.pull.timeout));

        output.push_str("\n[images]\n");
        for image in &self.images {
            output.push_str(&format!("{}\n", image));
        }

        output
    }
}

/// Handle the config init subcommand
pub fn handle_init(ctx: &AppContext) {
    match config::init_config(&ctx.config_path) {
        Ok(()) => ctx.formatter().success(&format!(
            "Initialized config file at: {}",
            ctx.config_path.display()
        )),
        Err(e) => fail(ctx, &e),
    }
}

/// Handle the config get subcommand
pub fn handle_get(ctx: &AppContext, format: OutputFormat) {
    match format_output(&ctx.config, format) {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => {
            ctx.formatter().error(&format!("formatting output: {}", e));
            std::process::exit(1);
        }
    }
}

/// Handle the config path subcommand
pub fn handle_path(ctx: &AppContext) {
    println!("{}", ctx.config_path.display());
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
