//! UID encoding commands.

use super::UidCommand;
use crate::uid;

pub fn cmd_uid(command: &UidCommand) -> anyhow::Result<()> {
    match command {
        UidCommand::Encode { id } => println!("{}", uid::to_uid(*id)),
        UidCommand::Decode { uid: value } => {
            let id = uid::from_uid(value.trim())
                .ok_or_else(|| anyhow::anyhow!("'{}' is not a valid UID", value))?;
            println!("{}", id);
        }
    }
    Ok(())
}
