// Probe Command Domain Model

/// Compiler configuration flag (`tsc -p <tsconfig>`)
pub const PROJECT_FLAG: &str = "-p";

/// A fully resolved compiler invocation: program plus argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeCommand {
    program: String,
    args: Vec<String>,
}

impl ProbeCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build `<compiler...> -p <tsconfig>`
    ///
    /// The first element of `compiler` is the executable; the rest are
    /// leading arguments (e.g. `["npx", "tsc"]`).
    ///
    /// Returns `None` if `compiler` is empty.
    pub fn compile(compiler: &[String], tsconfig: &str) -> Option<Self> {
        let (program, leading) = compiler.split_first()?;

        let mut args = leading.to_vec();
        args.push(PROJECT_FLAG.to_string());
        args.push(tsconfig.to_string());

        Some(Self::new(program.clone(), args))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Program followed by arguments, as the report's `command` sequence
    pub fn to_vec(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Literal command string (space-joined)
    pub fn display(&self) -> String {
        self.to_vec().join(" ")
    }
}

impl std::fmt::Display for ProbeCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn npx_tsc() -> Vec<String> {
        vec!["npx".to_string(), "tsc".to_string()]
    }

    #[test]
    fn test_compile_appends_project_flag() {
        let cmd = ProbeCommand::compile(&npx_tsc(), "daemon/tsconfig.json").unwrap();

        assert_eq!(cmd.program(), "npx");
        assert_eq!(cmd.args(), &["tsc", "-p", "daemon/tsconfig.json"]);
        assert_eq!(cmd.display(), "npx tsc -p daemon/tsconfig.json");
    }

    #[test]
    fn test_compile_single_program() {
        let cmd = ProbeCommand::compile(&["tsc".to_string()], "tsconfig.json").unwrap();

        assert_eq!(cmd.to_vec(), vec!["tsc", "-p", "tsconfig.json"]);
    }

    #[test]
    fn test_compile_empty_compiler() {
        assert!(ProbeCommand::compile(&[], "tsconfig.json").is_none());
    }
}
