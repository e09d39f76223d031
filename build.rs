use std::env;
use std::error::Error;
use std::path::Path;
use std::process::Command;

use simple_error::bail;

fn uncommitted_count() -> usize {
    let output = match _exec_git(&["status", "-s"]) {
        Ok(output) => output,
        Err(_) => return 0,
    };
    let lines = output.trim().split('\n');
    lines.filter(|line| !line.trim().is_empty()).count()
}

fn _exec_git(args: &[&str]) -> Result<String, Box<dyn Error>> {
    let mut cmd = Command::new("git");
    let output = cmd.args(args).output()?;
    if !output.status.success() {
        let cmd = format!("git {}", args.join(" "));
        bail!("Execute git command {} failed", cmd);
    }
    let output = String::from_utf8(output.stdout)?;
    Ok(output.trim().to_string())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Outside a git checkout (e.g. a published crate) fall back to the
    // package version.
    let mut version = match _exec_git(&["describe", "--tags"]) {
        Ok(version) => version,
        Err(_) => format!("v{}", env::var("CARGO_PKG_VERSION")?),
    };
    if uncommitted_count() > 0 {
        version = format!("{version}-dirty");
    }

    println!("cargo:rustc-env=ECHOIP_VERSION={version}");
    // A missing rerun-if-changed path reruns the script on every build.
    for path in [".git/HEAD", ".git/index"] {
        if Path::new(path).exists() {
            println!("cargo:rerun-if-changed={path}");
        }
    }

    Ok(())
}
