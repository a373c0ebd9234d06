/// Config command handlers
pub mod config;

/// Ensure command handlers
pub mod ensure;

/// Inspect command handlers
pub mod inspect;

/// Version command handlers
pub mod version;

use crate::context::AppContext;
use libdockup::{DockerEngine, DockupError, Provisioner};

/// Connect a provisioner to the engine configured in `ctx`, exiting on failure
pub(crate) fn connect(ctx: &AppContext) -> Provisioner<DockerEngine> {
    match DockerEngine::connect(&ctx.config.engine) {
        Ok(engine) => Provisioner::new(engine),
        Err(e) => fail(ctx, &e),
    }
}

/// Process exit code for an error
pub(crate) fn exit_code(e: &DockupError) -> i32 {
    match e {
        DockupError::Interrupted => 130,
        _ => 1,
    }
}

/// Report `e` and exit
pub(crate) fn fail(ctx: &AppContext, e: &DockupError) -> ! {
    ctx.formatter().error(&e.to_string());
    std::process::exit(exit_code(e));
}
