use super::Session;
use anyhow::Result;
use uet::platform::InstallationMap;

pub fn run(session: &Session) -> Result<()> {
    let installations = session.installations();

    print_group(session, "Launcher installations:", &installations.launcher);
    print_group(session, "Source installations:", &installations.source);
    print_group(session, "Configured installations:", &installations.configured);

    if installations.is_empty() {
        session.reporter.info("");
        session
            .reporter
            .info("Register an engine with: uet config add-engine <identifier> <path>");
    }
    Ok(())
}

fn print_group(session: &Session, title: &str, engines: &InstallationMap) {
    session.reporter.info(title);
    if engines.is_empty() {
        session.reporter.info("  none");
    }
    for (identifier, root) in engines {
        session.reporter.info(format!(
            "  Id: '{}'. Root dir: '{}'",
            identifier,
            root.display()
        ));
    }
}
