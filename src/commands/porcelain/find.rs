use crate::areas::repository::Repository;
use crate::errors::RepositoryError;

impl Repository {
    /// Print the id of every commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut matches = Vec::new();
        for commit in self.database().commits()? {
            if commit.message() == message {
                matches.push(commit.id()?.clone());
            }
        }

        if matches.is_empty() {
            return Err(RepositoryError::NoCommitWithMessage.into());
        }

        matches.sort();
        for oid in matches {
            writeln!(self.writer(), "{oid}")?;
        }

        Ok(())
    }
}
