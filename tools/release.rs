use chrono::Local;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use toml_edit::{DocumentMut, Item};

const CHANGELOG: &str = "CHANGELOG.md";

fn run_git(args: &[&str]) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let output = Command::new("git").args(args).output()?;
    if !output.status.success() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8(output.stdout)?.trim().to_string()))
}

/// Returns the latest tag, or `None` when nothing has been tagged yet
fn previous_release() -> Result<Option<String>, Box<dyn std::error::Error>> {
    run_git(&["describe", "--tags", "--abbrev=0"])
}

/// Builds the `git log` arguments; without a tag the whole history is listed
fn log_args(since: Option<&str>) -> Vec<String> {
    let mut args = vec!["log".to_string(), "--pretty=format:- %s".to_string()];
    if let Some(tag) = since {
        args.push(format!("{}..HEAD", tag));
    }
    args
}

fn release_notes(since: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    let args = log_args(since);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    Ok(run_git(&args)?.unwrap_or_default())
}

fn confirm(message: &str) -> Result<bool, io::Error> {
    print!("{} (y/n): ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn prompt(message: &str) -> Result<String, io::Error> {
    println!("{}", message);
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Sets `package.version` in the manifest, returning the crate name
fn bump_manifest(version: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut doc = fs::read_to_string("Cargo.toml")?.parse::<DocumentMut>()?;
    let name = doc["package"]["name"]
        .as_str()
        .ok_or("Could not find package name in Cargo.toml")?
        .to_string();
    doc["package"]["version"] = Item::from(version);
    fs::write("Cargo.toml", doc.to_string())?;
    Ok(name)
}

/// Prepends a dated section for `version` to the changelog
fn update_changelog(version: &str, notes: &str) -> Result<(), Box<dyn std::error::Error>> {
    let existing = if Path::new(CHANGELOG).exists() {
        fs::read_to_string(CHANGELOG)?
    } else {
        "# Changelog\n".to_string()
    };

    let (header, rest) = match existing.split_once('\n') {
        Some((header, rest)) => (header, rest),
        None => (existing.as_str(), ""),
    };

    let date = Local::now().format("%Y-%m-%d");
    let section = format!("\n## {} - {}\n\n{}\n", version, date, notes);
    fs::write(CHANGELOG, format!("{}\n{}{}", header, section, rest))?;
    Ok(())
}

/// File contents captured before the release edits, `None` for files that did not exist
struct Backup {
    files: Vec<(PathBuf, Option<String>)>,
}

impl Backup {
    fn capture<P: AsRef<Path>>(paths: &[P]) -> Result<Self, io::Error> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let contents = if path.exists() {
                Some(fs::read_to_string(path)?)
            } else {
                None
            };
            files.push((path.to_path_buf(), contents));
        }
        Ok(Self { files })
    }

    /// Puts every file back the way it was, removing ones that were created since
    fn restore(&self) -> Result<(), io::Error> {
        for (path, contents) in &self.files {
            match contents {
                Some(contents) => fs::write(path, contents)?,
                None if path.exists() => fs::remove_file(path)?,
                None => {}
            }
        }
        Ok(())
    }
}

fn shell(cmd: &str, error_msg: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Executing: {}", cmd);
    let status = Command::new("sh").arg("-c").arg(cmd).status()?;
    if !status.success() {
        return Err(error_msg.to_string().into());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest = fs::read_to_string("Cargo.toml")?.parse::<DocumentMut>()?;
    let current_version = manifest["package"]["version"]
        .as_str()
        .ok_or("Could not find version in Cargo.toml")?
        .to_string();

    println!("Current version is: {}", current_version);
    let new_version = prompt("Enter new version:")?;
    if new_version.is_empty() {
        return Err("Version cannot be empty".into());
    }
    if new_version == current_version {
        return Err("New version matches the current version".into());
    }

    if !confirm(&format!("Ready to release version {}?", new_version))? {
        println!("Release aborted.");
        return Ok(());
    }

    let previous = previous_release()?;
    println!("Previous release: {}", previous.as_deref().unwrap_or("None"));

    let notes = release_notes(previous.as_deref())?;
    if notes.is_empty() {
        println!("Warning: No commits found since the previous release.");
        if !confirm("Continue with empty release notes?")? {
            println!("Release aborted.");
            return Ok(());
        }
    } else {
        println!("Release notes:");
        println!("{}", notes);
    }

    let backup = Backup::capture(&["Cargo.toml", CHANGELOG])?;

    let crate_name = bump_manifest(&new_version)?;
    println!("Updated {} to version {}", crate_name, new_version);
    update_changelog(&new_version, &notes)?;
    println!("Added {} section to {}", new_version, CHANGELOG);

    // Refresh Cargo.lock and make sure the release builds and passes its tests
    if let Err(e) = shell("cargo test --all-targets", "Tests failed; release aborted") {
        backup.restore()?;
        println!("Restored Cargo.toml and {}", CHANGELOG);
        return Err(e);
    }

    shell(
        &format!("git add Cargo.toml Cargo.lock {}", CHANGELOG),
        "Failed to stage release files",
    )?;
    shell(
        &format!("git commit -m \"Release {} {}\"", crate_name, new_version),
        "Failed to commit version bump",
    )?;
    shell(
        &format!("git tag -a v{} -m \"Version {}\"", new_version, new_version),
        "Failed to create tag",
    )?;
    shell("git push", "Failed to push commits")?;
    shell("git push --tags", "Failed to push tags")?;

    if confirm("Publish to crates.io?")? {
        shell("cargo publish", "Failed to publish to crates.io")?;
    } else {
        println!("Skipping crates.io publishing.");
    }

    if confirm("Create GitHub release?")? {
        let status = Command::new("gh")
            .args([
                "release",
                "create",
                &format!("v{}", new_version),
                "--title",
                &format!("{} v{}", crate_name, new_version),
                "--notes",
                &notes,
            ])
            .status()?;

        if !status.success() {
            return Err("Failed to create GitHub release".into());
        }
    } else {
        println!("Skipping GitHub release creation.");
    }

    println!("Successfully released {} {}", crate_name, new_version);
    Ok(())
}
