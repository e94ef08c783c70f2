use super::Session;
use crate::SourceArgs;
use anyhow::Result;

pub fn run(session: &Session, source: &SourceArgs, dirs: &[String]) -> Result<()> {
    let Some(project) = session.resolve_project(source, "clean")? else {
        return Ok(());
    };

    let removed = uet::clean::clean(&project.root, dirs, session.dry_run, &session.reporter)?;
    if !session.dry_run && !removed.is_empty() {
        session.reporter.info(format!(
            "✓ Cleaned {} ({} director{})",
            project.name,
            removed.len(),
            if removed.len() == 1 { "y" } else { "ies" }
        ));
    }
    Ok(())
}
