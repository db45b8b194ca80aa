use std::fmt::Write as _;

/// Outcome of a single diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticCheck {
    pub name: String,
    /// `None` when the check passed.
    pub failure: Option<String>,
    pub details: Vec<String>,
}

impl DiagnosticCheck {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
    checks: Vec<DiagnosticCheck>,
}

impl DiagnosticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, outcome: Result<(), String>) {
        self.checks.push(DiagnosticCheck {
            name: name.into(),
            failure: outcome.err(),
            details: Vec::new(),
        });
    }

    /// Attaches an indented detail line to the most recent check.
    pub fn detail(&mut self, line: impl Into<String>) {
        if let Some(check) = self.checks.last_mut() {
            check.details.push(line.into());
        }
    }

    pub fn checks(&self) -> &[DiagnosticCheck] {
        &self.checks
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.checks.len() - self.passed_count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Operator report: one `[ OK ]`/`[FAIL]` line per check, then a summary.
    pub fn render(&self) -> String {
        let mut out = String::from("--- Running Analytics Node Diagnostics ---\n");
        for check in &self.checks {
            match &check.failure {
                None => {
                    let _ = writeln!(out, "[ OK ] {}", check.name);
                }
                Some(reason) => {
                    let _ = writeln!(out, "[FAIL] {}: {}", check.name, reason);
                }
            }
            for line in &check.details {
                let _ = writeln!(out, "       - {line}");
            }
        }
        let _ = writeln!(out, "\n--- Diagnostics Complete ---");
        let _ = writeln!(
            out,
            "Result: {}",
            if self.all_passed() { "PASS" } else { "FAIL" }
        );
        let _ = writeln!(out, "Checks Passed: {}", self.passed_count());
        let _ = writeln!(out, "Checks Failed: {}", self.failed_count());
        out
    }
}
