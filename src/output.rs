use serde::Serialize;

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json { OutputMode::Json } else { OutputMode::Human }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

/// Envelope printed in JSON mode
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: Serialize> {
    pub ok: bool,
    pub command: &'a str,
    pub data: T,
}

pub fn emit_success<T: Serialize>(command: &str, data: T) -> anyhow::Result<()> {
    let envelope = Envelope { ok: true, command, data };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

pub fn emit_failure(command: &str, message: &str) -> anyhow::Result<()> {
    let envelope = Envelope {
        ok: false,
        command,
        data: serde_json::json!({ "error": message }),
    };
    eprintln!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
