//! Lab workspace helpers: the UI URL banner and the kernel restart.

use crate::error::{DlaiProxyError, DlaiProxyResult};

/// Environment variable holding the lab's workspace identifier.
pub const WORKSPACE_ID_VAR: &str = "WORKSPACE_ID";

/// The lab UI URL for this workspace, derived from [`WORKSPACE_ID_VAR`].
pub fn workspace_url() -> DlaiProxyResult<String> {
    let lab_id = std::env::var(WORKSPACE_ID_VAR).map_err(|source| DlaiProxyError::Env {
        name: WORKSPACE_ID_VAR,
        source,
    })?;
    Ok(format!("http://{lab_id}.labs.coursera.org"))
}

/// Prints the lab UI URL on stdout, wrapped in ANSI bold so it stands out
/// in notebook output.
pub fn print_workspace_url() -> DlaiProxyResult<()> {
    const BOLD: &str = "\x1b[1m";
    const RESET: &str = "\x1b[0m";

    let url = workspace_url()?;
    println!("{BOLD}FOLLOW THIS URL TO OPEN THE UI: {url}{RESET}");
    Ok(())
}

/// Forces the hosting notebook kernel to restart by exiting the process.
///
/// The lab supervisor respawns the kernel; nothing after this call runs.
pub fn restart_kernel() -> ! {
    std::process::exit(0);
}
