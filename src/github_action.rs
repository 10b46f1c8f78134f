/// True when running inside a GitHub Actions step.
pub fn on_github_action() -> bool {
    std::env::var_os("GITHUB_ACTION").is_some()
}

pub fn format_output(key: &str, value: &str) -> String {
    format!("::set-output name={}::{}", key, value)
}

/// Emit step outputs as workflow commands on stdout.
pub fn set_action_outputs(outputs: &[(&str, String)]) {
    for (key, value) in outputs {
        println!("{}", format_output(key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_command() {
        assert_eq!(format_output("a", "b"), "::set-output name=a::b");
        assert_eq!(
            format_output("markdown_path", "output/titanic.md"),
            "::set-output name=markdown_path::output/titanic.md"
        );
    }
}
