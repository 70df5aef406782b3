/// Files reported by `git status --porcelain`, split by staging state.
#[derive(Debug, Default, PartialEq)]
pub struct GitFiles {
    pub tracked: Vec<String>,
    pub untracked: Vec<String>,
}

impl GitFiles {
    /// Listing shown when there is nothing staged to diff.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let mut tracked = self.tracked.clone();
        tracked.sort();
        for (i, file) in tracked.iter().enumerate() {
            if i == 0 {
                out.push_str("Files with changes:\n");
            }
            out.push('\t');
            out.push_str(file);
            out.push('\n');
        }

        let mut untracked = self.untracked.clone();
        untracked.sort();
        for (i, file) in untracked.iter().enumerate() {
            if i == 0 {
                out.push_str("Untracked:\n");
            }
            out.push('\t');
            out.push_str(file);
            out.push('\n');
        }

        out
    }
}

/// Parse `git status --porcelain` output.
///
/// Each entry is a two-character XY code, a space, then the path. Renames
/// carry both sides as `old -> new`; only the new side is kept.
pub fn parse_porcelain(output: &str) -> GitFiles {
    let mut files = GitFiles::default();

    for line in output.lines() {
        if line.len() < 4 {
            continue;
        }
        let code = &line[..2];
        let mut path = &line[3..];
        if let Some((_, renamed)) = path.split_once(" -> ") {
            path = renamed;
        }

        if code == "??" {
            files.untracked.push(path.to_string());
        } else {
            files.tracked.push(path.to_string());
        }
    }

    files
}
