use super::{Finding, Severity};

/// Every finding from a run, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    findings: Vec<Finding>,
}

impl Report {
    pub fn new() -> Report {
        Report::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings
            .push(finding);
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.severity == Severity::Warning)
    }

    /// No errors. Warnings do not count against a report.
    pub fn is_clean(&self) -> bool {
        self.errors()
            .next()
            .is_none()
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_clean() {
            0
        } else {
            1
        }
    }

    /// The error findings rendered as text, one per line.
    pub fn error_lines(&self) -> Vec<String> {
        self.errors()
            .map(|finding| finding.to_string())
            .collect()
    }
}

impl Extend<Finding> for Report {
    fn extend<T: IntoIterator<Item = Finding>>(&mut self, iter: T) {
        self.findings
            .extend(iter);
    }
}
