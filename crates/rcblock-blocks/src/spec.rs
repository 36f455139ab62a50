//! Block identity: a name and its marker pair

use serde::Serialize;

use crate::{Error, Result};

/// A named block and the two literal lines that delimit it.
///
/// Markers are matched against whole lines only, so a marker that shows up
/// inside a longer line (a comment quoting it, say) is not a marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BlockSpec {
    name: String,
    start: String,
    end: String,
}

impl BlockSpec {
    /// Create a block spec from explicit markers.
    ///
    /// # Errors
    /// Returns `Error::InvalidMarker` if either marker is empty or blank,
    /// spans several lines, or both markers are the same.
    pub fn new(
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Result<Self> {
        let spec = Self {
            name: name.into(),
            start: start.into(),
            end: end.into(),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Conda-style markers: `# >>> {namespace} {name} >>>` / `# <<< {namespace} {name} <<<`.
    ///
    /// # Example
    /// ```
    /// use rcblock_blocks::BlockSpec;
    ///
    /// let spec = BlockSpec::namespaced("rcblock", "env").unwrap();
    /// assert_eq!(spec.start(), "# >>> rcblock env >>>");
    /// assert_eq!(spec.end(), "# <<< rcblock env <<<");
    /// ```
    pub fn namespaced(namespace: &str, name: &str) -> Result<Self> {
        Self::new(
            name,
            format!("# >>> {namespace} {name} >>>"),
            format!("# <<< {namespace} {name} <<<"),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Render the full block, markers included.
    pub fn render<S: AsRef<str>>(&self, body: &[S]) -> Vec<String> {
        let mut lines = Vec::with_capacity(body.len() + 2);
        lines.push(self.start.clone());
        lines.extend(body.iter().map(|l| l.as_ref().to_string()));
        lines.push(self.end.clone());
        lines
    }

    /// Reject body lines that would read back as markers.
    pub fn check_body<S: AsRef<str>>(&self, body: &[S]) -> Result<()> {
        for (index, line) in body.iter().enumerate() {
            let line = line.as_ref();
            if line == self.start || line == self.end {
                return Err(Error::InvalidBody {
                    block: self.name.clone(),
                    index,
                });
            }
            if line.contains('\n') {
                return Err(Error::InvalidMarker {
                    block: self.name.clone(),
                    reason: format!("body line {index} contains a line break"),
                });
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let reject = |reason: &str| {
            Err(Error::InvalidMarker {
                block: self.name.clone(),
                reason: reason.to_string(),
            })
        };

        if self.start.trim().is_empty() || self.end.trim().is_empty() {
            return reject("markers must not be empty");
        }
        if self.start.contains(['\n', '\r']) || self.end.contains(['\n', '\r']) {
            return reject("markers must be single lines");
        }
        if self.start == self.end {
            return reject("start and end markers must differ");
        }
        Ok(())
    }
}

impl std::fmt::Display for BlockSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
