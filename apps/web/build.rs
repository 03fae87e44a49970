use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-env-changed=NAVGATE_SESSION_URL");
    println!("cargo:rerun-if-env-changed=NAVGATE_BASE_PATH");
    println!("cargo:rerun-if-env-changed=NAVGATE_SIGN_IN_PATH");

    let sha = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if !output.status.success() {
                return None;
            }
            String::from_utf8(output.stdout)
                .ok()
                .map(|value| value.trim().to_string())
        })
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=NAVGATE_WEB_GIT_SHA={sha}");
}
