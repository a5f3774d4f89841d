//! Playbook mutations routed through the session so that a successful
//! change queues an event for the dropdowns to refresh from.

use crate::error::Result;
use crate::journal::{ChangeEvent, JournalSession};
use crate::models::Category;
use crate::store::CategoryOptions;

pub fn playbook_options(session: &JournalSession, category: Category) -> Result<CategoryOptions> {
    session.playbook_options(category)
}

pub fn add_option(
    session: &mut JournalSession,
    category: Category,
    item: &str,
) -> Result<Vec<String>> {
    let options = session.playbook.add(category, item)?;
    session.push_event(ChangeEvent::PlaybookChanged(category));
    Ok(options)
}

pub fn edit_option(
    session: &mut JournalSession,
    category: Category,
    old: &str,
    new: &str,
) -> Result<Vec<String>> {
    let options = session.playbook.edit(category, old, new)?;
    session.push_event(ChangeEvent::PlaybookChanged(category));
    Ok(options)
}

pub fn delete_option(
    session: &mut JournalSession,
    category: Category,
    item: &str,
) -> Result<Vec<String>> {
    let options = session.playbook.delete(category, item)?;
    session.push_event(ChangeEvent::PlaybookChanged(category));
    Ok(options)
}
