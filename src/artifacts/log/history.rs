use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::fmt;

/// Lazy first-parent walk from a commit back to the root
///
/// Each step loads one commit; a commit that cannot be loaded ends the walk with
/// that error.
#[derive(Debug, new)]
pub struct History<'d> {
    database: &'d Database,
    next_commit_oid: Option<ObjectId>,
}

impl Iterator for History<'_> {
    type Item = anyhow::Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.next_commit_oid.take()?;

        match self.database.load_commit(&commit_oid) {
            Ok(commit) => {
                self.next_commit_oid = commit.parent().cloned();
                Some(Ok(commit))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

/// Every stored commit, newest first, ties broken by id
pub fn all_commits(database: &Database) -> anyhow::Result<Vec<Commit>> {
    let mut commits = database
        .all_commit_ids()?
        .iter()
        .map(|oid| database.load_commit(oid))
        .collect::<anyhow::Result<Vec<_>>>()?;

    commits.sort_by(|a, b| {
        b.timestamp()
            .cmp(&a.timestamp())
            .then_with(|| b.oid().cmp(a.oid()))
    });

    Ok(commits)
}

/// One `log` / `global-log` entry
///
/// ```text
/// ===
/// commit <id>
/// Merge: <first parent> <second parent>
/// Date: Thu Nov 9 20:00:05 2017 -0800
/// <message>
///
/// ```
#[derive(Debug, new)]
pub struct LogEntry<'c> {
    commit: &'c Commit,
}

impl fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===")?;
        writeln!(f, "commit {}", self.commit.oid())?;

        if self.commit.parents().is_merge() {
            let parents = self
                .commit
                .parents()
                .iter()
                .map(ObjectId::to_short_oid)
                .collect::<Vec<_>>();
            writeln!(f, "Merge: {}", parents.join(" "))?;
        }

        writeln!(f, "Date: {}", self.commit.readable_timestamp())?;
        writeln!(f, "{}", self.commit.message())?;
        writeln!(f)
    }
}
