use std::process::Command;

fn main() {
  embed_build_info();
  set_rerun_conditions();
}

/// Runs `git` with `args`, returning trimmed stdout or `fallback` when git is
/// unavailable or not in a repository.
fn git_output(args: &[&str], fallback: &str) -> String {
  Command::new("git")
    .args(args)
    .output()
    .ok()
    .filter(|output| output.status.success())
    .and_then(|output| String::from_utf8(output.stdout).ok())
    .map(|out| out.trim().to_string())
    .filter(|out| !out.is_empty())
    .unwrap_or_else(|| fallback.to_string())
}

fn embed_build_info() {
  // Short commit hash and commit date (YYYY-MM-DD) for `--version`
  println!("cargo:rustc-env=GIT_HASH={}", git_output(&["rev-parse", "--short", "HEAD"], "unknown"));
  println!("cargo:rustc-env=GIT_DATE={}", git_output(&["log", "-1", "--format=%cs"], "unknown"));
}

fn set_rerun_conditions() {
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
}
