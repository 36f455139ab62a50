//! Desired block content for each shell dialect.
//!
//! Rendering is a pure function of the configuration and the home
//! directory: the same inputs always yield byte-identical lines, which is
//! what makes repeated wiring a no-op.

use std::path::Path;

use rcblock_fs::DocumentPath;

use crate::{BlockKind, Shell, WiringConfig};

/// Renders block bodies for one configuration.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    config: &'a WiringConfig,
    home: &'a Path,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a WiringConfig, home: &'a Path) -> Self {
        Self { config, home }
    }

    /// Body lines of `kind` for a `shell` target, markers excluded.
    pub fn render(&self, kind: BlockKind, shell: Shell) -> Vec<String> {
        match kind {
            BlockKind::Env => self.env_lines(shell),
            BlockKind::Hook => self.hook_lines(shell),
        }
    }

    fn env_lines(&self, shell: Shell) -> Vec<String> {
        let mut lines = vec![
            format!(
                "export MAMBA_ROOT_PREFIX={}",
                quote_literal(&self.path(&self.config.mamba_root_prefix))
            ),
            format!(
                "export MAMBA_EXE={}",
                quote_literal(&self.path(&self.config.mamba_exe))
            ),
        ];

        // Prepend in reverse so the first configured dir ends up first on PATH
        for dir in self.config.bin_dirs.iter().rev() {
            let dir = escape(&self.path(dir), true);
            lines.push("case \":${PATH}:\" in".to_string());
            lines.push(format!("    *\":{dir}:\"*) ;;"));
            lines.push(format!("    *) export PATH=\"{dir}:${{PATH}}\" ;;"));
            lines.push("esac".to_string());
        }

        for (name, value) in &self.config.env {
            lines.push(format!("export {name}={}", quote_expanding(value)));
        }

        if shell == Shell::Bash && self.config.bash_env {
            lines.push(format!(
                "export BASH_ENV={}",
                quote_literal(&self.path(&self.config.env_file))
            ));
        }
        lines
    }

    fn hook_lines(&self, shell: Shell) -> Vec<String> {
        let Some(hook_shell) = shell.hook_name() else {
            return Vec::new();
        };
        let exe = quote_literal(&self.path(&self.config.mamba_exe));
        let prefix = quote_literal(&self.path(&self.config.mamba_root_prefix));

        let mut lines = vec![
            format!("if [ -x {exe} ]; then"),
            format!(
                "    eval \"$({exe} shell hook --shell {hook_shell} --root-prefix {prefix} 2>/dev/null)\""
            ),
        ];
        if let Some(env) = &self.config.activate {
            lines.push(format!("    micromamba activate {env}"));
        }
        lines.push("fi".to_string());
        lines
    }

    fn path(&self, raw: &str) -> String {
        DocumentPath::resolve(raw, self.home).to_string()
    }
}

/// Double-quote a value the shell must not expand.
pub fn quote_literal(value: &str) -> String {
    format!("\"{}\"", escape(value, true))
}

/// Double-quote a value, leaving `$` expansions to the shell.
pub fn quote_expanding(value: &str) -> String {
    format!("\"{}\"", escape(value, false))
}

fn escape(value: &str, dollar: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '"' | '`' => out.push('\\'),
            '$' if dollar => out.push('\\'),
            _ => {}
        }
        out.push(c);
    }
    out
}
