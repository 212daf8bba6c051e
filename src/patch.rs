use crate::config::Settings;
use crate::error::{PatchError, Result};
use crate::version::{VersionLabel, TRAILING_LABEL};
use log::{debug, info, warn};
use std::fmt;
use std::fs;
use std::path::Path;

/// Fixed insertion points. Content always goes immediately before the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Footer,
    Head,
}

impl Anchor {
    pub fn tag(&self) -> &'static str {
        match self {
            Anchor::Footer => "</footer>",
            Anchor::Head => "</head>",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Inserted,
    /// `once` mode found the insertion already in place.
    AlreadyPresent,
    Missing,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    /// Fail on a missing anchor instead of leaving that section untouched.
    pub strict: bool,
    /// Skip an insertion that a previous run already made.
    pub once: bool,
    /// Compute the result without writing it back.
    pub dry_run: bool,
}

/// What gets inserted: the footer label and the head tags.
#[derive(Debug, Clone)]
pub struct Patch {
    pub label: VersionLabel,
    pub settings: Settings,
}

impl Patch {
    pub fn new(label: VersionLabel, settings: Settings) -> Self {
        Patch { label, settings }
    }

    pub fn footer_text(&self) -> String {
        format!("{}{}", self.settings.footer_separator, self.label)
    }

    pub fn head_text(&self) -> String {
        self.settings.head_tags.to_string()
    }
}

#[derive(Debug)]
pub struct Applied {
    pub contents: String,
    pub footer: Outcome,
    pub head: Outcome,
}

impl Applied {
    pub fn changed(&self) -> bool {
        self.footer == Outcome::Inserted || self.head == Outcome::Inserted
    }
}

fn insert_before(contents: &mut String, anchor: Anchor, text: &str, once: bool) -> Outcome {
    let tag = anchor.tag();
    let Some(pos) = contents.find(tag) else {
        warn!("{} not found, leaving that section unpatched", anchor);
        return Outcome::Missing;
    };
    if contents[pos + tag.len()..].contains(tag) {
        warn!("{} occurs more than once, patching the first occurrence only", anchor);
    }

    if once {
        let before = &contents[..pos];
        let present = match anchor {
            Anchor::Footer => TRAILING_LABEL.is_match(before),
            Anchor::Head => before.ends_with(text),
        };
        if present {
            debug!("{} already patched, skipping", anchor);
            return Outcome::AlreadyPresent;
        }
    }

    contents.insert_str(pos, text);
    Outcome::Inserted
}

/// Applies the patch to an in-memory document.
pub fn apply(contents: &str, patch: &Patch, options: &Options) -> Result<Applied> {
    if options.strict {
        for anchor in [Anchor::Footer, Anchor::Head] {
            if !contents.contains(anchor.tag()) {
                return Err(PatchError::MissingAnchor(anchor));
            }
        }
    }

    let mut contents = contents.to_string();
    let footer = insert_before(&mut contents, Anchor::Footer, &patch.footer_text(), options.once);
    let head = insert_before(&mut contents, Anchor::Head, &patch.head_text(), options.once);

    Ok(Applied {
        contents,
        footer,
        head,
    })
}

/// Reads `path`, applies the patch and writes the result back over the same file.
pub fn patch_file(path: &Path, patch: &Patch, options: &Options) -> Result<Applied> {
    let contents = fs::read_to_string(path).map_err(|e| PatchError::io(path, e))?;
    let applied = apply(&contents, patch, options)?;

    if options.dry_run {
        debug!("dry run, not writing {}", path.display());
    } else {
        fs::write(path, &applied.contents).map_err(|e| PatchError::io(path, e))?;
        info!(
            "patched {} (footer: {:?}, head: {:?})",
            path.display(),
            applied.footer,
            applied.head
        );
    }
    Ok(applied)
}
