//! External validation adapter.
//!
//! Optional integrations look at a finished stack and return advisory
//! strings. Every call is time-boxed: availability probes and validator runs
//! execute on a worker thread and are abandoned after the configured
//! timeout. A failing, hanging or missing integration is logged and skipped;
//! it never fails a recommendation.

use crate::config::ValidationConfig;
use crate::error::Result;
use crate::stack::RecommendedStack;
use crate::types::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::process::{Command, Stdio};
use std::sync::{mpsc, Arc};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationFindings {
    #[serde(default)]
    pub security_issues: Vec<String>,
    #[serde(default)]
    pub compatibility_warnings: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub license_issues: Vec<String>,
}

impl ValidationFindings {
    pub fn is_empty(&self) -> bool {
        self.security_issues.is_empty()
            && self.compatibility_warnings.is_empty()
            && self.recommendations.is_empty()
            && self.license_issues.is_empty()
    }

    fn merge(&mut self, other: ValidationFindings) {
        self.security_issues.extend(other.security_issues);
        self.compatibility_warnings.extend(other.compatibility_warnings);
        self.recommendations.extend(other.recommendations);
        self.license_issues.extend(other.license_issues);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Success,
    NoIntegrations,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub validated_by: Vec<String>,
    pub active_integrations: Vec<String>,
    #[serde(flatten)]
    pub findings: ValidationFindings,
    pub timestamp: DateTime<Utc>,
}

impl ValidationReport {
    fn empty(status: ValidationStatus, message: &str) -> Self {
        Self {
            status,
            message: Some(message.to_string()),
            validated_by: Vec::new(),
            active_integrations: Vec::new(),
            findings: ValidationFindings::default(),
            timestamp: Utc::now(),
        }
    }
}

/// An external check over a finished stack.
pub trait StackValidator: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the integration can run here. May spawn a process; callers
    /// bound it with a timeout.
    fn is_available(&self, timeout: Duration) -> bool;

    /// `Ok(None)` means the integration had nothing to say.
    fn validate(&self, stack: &RecommendedStack) -> Result<Option<ValidationFindings>>;
}

// ---------------------------------------------------------------------------
// Timeout helpers
// ---------------------------------------------------------------------------

/// Run `f` on a worker thread and wait at most `timeout` for its result.
/// On timeout the worker is abandoned and `None` is returned.
fn run_with_timeout<T, F>(timeout: Duration, f: F) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(timeout).ok()
}

/// Run `program args...` and report whether it exited successfully within
/// `timeout`. Output is discarded. The child is killed on timeout.
pub fn probe_command(program: &str, args: &[&str], timeout: Duration) -> bool {
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(program, error = %e, "probe could not start");
            return false;
        }
    };

    let child_pid = child.id();
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(child.wait());
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok(status)) => status.success(),
        Ok(Err(e)) => {
            tracing::debug!(program, error = %e, "probe wait failed");
            false
        }
        Err(_) => {
            kill_process(child_pid);
            tracing::warn!(program, secs = timeout.as_secs(), "probe timed out");
            false
        }
    }
}

/// Terminate a process by PID. Best-effort; errors are ignored.
fn kill_process(pid: u32) {
    let _ = Command::new("kill")
        .arg("-9")
        .arg(pid.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
}

// ---------------------------------------------------------------------------
// Built-in integrations
// ---------------------------------------------------------------------------

const SECURITY_ADVISORIES: &[(&str, &[&str])] = &[
    (
        "react",
        &["Ensure XSS protection is properly configured", "Validate all user inputs on frontend"],
    ),
    (
        "nextjs",
        &["Ensure XSS protection is properly configured", "Validate all user inputs on frontend"],
    ),
    (
        "vue",
        &["Ensure XSS protection is properly configured", "Validate all user inputs on frontend"],
    ),
    (
        "fastapi",
        &["Implement proper CORS configuration", "Use parameterized queries to prevent SQL injection"],
    ),
    (
        "django",
        &["Implement proper CORS configuration", "Use parameterized queries to prevent SQL injection"],
    ),
    (
        "flask",
        &["Implement proper CORS configuration", "Use parameterized queries to prevent SQL injection"],
    ),
    (
        "postgresql",
        &["Ensure database connections are encrypted", "Implement proper access controls"],
    ),
    (
        "mysql",
        &["Ensure database connections are encrypted", "Implement proper access controls"],
    ),
];

const FRONTEND_HARDENING: &[&str] = &[
    "Implement Content Security Policy (CSP) headers",
    "Use HTTPS for all production deployments",
    "Implement proper authentication and session management",
];
const BACKEND_HARDENING: &[&str] = &[
    "Implement rate limiting to prevent abuse",
    "Use environment variables for sensitive configuration",
    "Implement proper logging and monitoring",
];
const DATABASE_HARDENING: &[&str] = &[
    "Use database connection pooling",
    "Implement database backup and recovery procedures",
    "Use least privilege principle for database access",
];

const CONTEXT_NOTES: &[(&str, &str)] = &[
    ("fastapi", "FastAPI has good security practices but ensure proper input validation"),
    ("react", "React requires careful XSS protection and dependency management"),
    ("postgresql", "PostgreSQL is secure but ensure proper connection encryption"),
];

const BEST_PRACTICES: &[(&str, &str)] = &[
    (
        "fastapi",
        "Use Pydantic models for validation and implement proper error handling",
    ),
    (
        "react",
        "Use functional components with hooks and implement proper state management",
    ),
    (
        "postgresql",
        "Use connection pooling and implement proper indexing strategies",
    ),
];

fn lines(items: &'static [&'static str]) -> impl Iterator<Item = String> {
    items.iter().map(|s| s.to_string())
}

/// Static security analysis, available when the `semgrep` binary runs.
#[derive(Debug, Default)]
pub struct SemgrepValidator;

impl StackValidator for SemgrepValidator {
    fn name(&self) -> &str {
        "semgrep"
    }

    fn is_available(&self, timeout: Duration) -> bool {
        probe_command("semgrep", &["--version"], timeout)
    }

    fn validate(&self, stack: &RecommendedStack) -> Result<Option<ValidationFindings>> {
        let mut findings = ValidationFindings::default();
        for (_, tech) in stack.entries() {
            if let Some((_, advisories)) = SECURITY_ADVISORIES.iter().find(|(t, _)| *t == tech) {
                findings
                    .security_issues
                    .extend(advisories.iter().map(|a| format!("{tech}: {a}")));
            }
        }

        if stack.is_one_of(Category::Frontend, &["react", "vue", "angular", "nextjs"]) {
            findings.recommendations.extend(lines(FRONTEND_HARDENING));
        }
        if stack.is_one_of(Category::Backend, &["fastapi", "django", "flask", "express"]) {
            findings.recommendations.extend(lines(BACKEND_HARDENING));
        }
        if stack.is_one_of(Category::Database, &["postgresql", "mysql", "mongodb"]) {
            findings.recommendations.extend(lines(DATABASE_HARDENING));
        }

        Ok((!findings.is_empty()).then_some(findings))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum McpFlavor {
    Context,
    Reference,
}

/// An MCP server integration, available when `mcp-<name>` is on PATH.
#[derive(Debug)]
pub struct McpServerValidator {
    name: String,
    flavor: McpFlavor,
}

impl McpServerValidator {
    pub fn context7() -> Self {
        Self {
            name: "context7".to_string(),
            flavor: McpFlavor::Context,
        }
    }

    pub fn mcpref() -> Self {
        Self {
            name: "mcpref".to_string(),
            flavor: McpFlavor::Reference,
        }
    }

    fn executable(&self) -> String {
        format!("mcp-{}", self.name)
    }
}

impl StackValidator for McpServerValidator {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self, _timeout: Duration) -> bool {
        which::which(self.executable()).is_ok()
    }

    fn validate(&self, stack: &RecommendedStack) -> Result<Option<ValidationFindings>> {
        let mut findings = ValidationFindings::default();
        for (_, tech) in stack.entries() {
            match self.flavor {
                McpFlavor::Context => {
                    if let Some((_, note)) = CONTEXT_NOTES.iter().find(|(t, _)| *t == tech) {
                        findings.security_issues.push(format!("{tech}: {note}"));
                    }
                }
                McpFlavor::Reference => {
                    if let Some((_, practice)) = BEST_PRACTICES.iter().find(|(t, _)| *t == tech) {
                        findings
                            .recommendations
                            .push(format!("{tech} best practice: {practice}"));
                    }
                }
            }
        }
        Ok((!findings.is_empty()).then_some(findings))
    }
}

/// Built-in validators for the configured integration names, in order.
/// Unknown names are skipped.
pub fn builtin_validators(names: &[String]) -> Vec<Arc<dyn StackValidator>> {
    names
        .iter()
        .filter_map(|name| -> Option<Arc<dyn StackValidator>> {
            match name.as_str() {
                "semgrep" => Some(Arc::new(SemgrepValidator)),
                "context7" => Some(Arc::new(McpServerValidator::context7())),
                "mcpref" => Some(Arc::new(McpServerValidator::mcpref())),
                other => {
                    tracing::debug!(integration = other, "unknown integration skipped");
                    None
                }
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Availability of each validator, probed with `timeout`.
pub fn availability(validators: &[Arc<dyn StackValidator>], timeout: Duration) -> Vec<(String, bool)> {
    validators
        .iter()
        .map(|v| {
            let worker = Arc::clone(v);
            let available =
                run_with_timeout(timeout, move || worker.is_available(timeout)).unwrap_or(false);
            (v.name().to_string(), available)
        })
        .collect()
}

/// Run every available validator against `stack` and merge their findings.
pub fn validate_stack(
    validators: &[Arc<dyn StackValidator>],
    stack: &RecommendedStack,
    config: &ValidationConfig,
) -> ValidationReport {
    if !config.enabled {
        return ValidationReport::empty(ValidationStatus::Disabled, "External validation disabled");
    }

    let timeout = config.timeout();
    let active: Vec<&Arc<dyn StackValidator>> = validators
        .iter()
        .zip(availability(validators, timeout))
        .filter_map(|(v, (_, available))| available.then_some(v))
        .collect();

    if active.is_empty() {
        return ValidationReport::empty(
            ValidationStatus::NoIntegrations,
            "No validation integrations available",
        );
    }

    let mut report = ValidationReport {
        status: ValidationStatus::Success,
        message: None,
        validated_by: Vec::new(),
        active_integrations: active.iter().map(|v| v.name().to_string()).collect(),
        findings: ValidationFindings::default(),
        timestamp: Utc::now(),
    };

    for v in active {
        let worker = Arc::clone(v);
        let snapshot = stack.clone();
        match run_with_timeout(timeout, move || worker.validate(&snapshot)) {
            Some(Ok(Some(findings))) => {
                report.validated_by.push(v.name().to_string());
                report.findings.merge(findings);
            }
            Some(Ok(None)) => {}
            Some(Err(e)) => {
                tracing::warn!(integration = v.name(), error = %e, "validation failed");
            }
            None => {
                tracing::warn!(integration = v.name(), secs = timeout.as_secs(), "validation timed out");
            }
        }
    }

    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
