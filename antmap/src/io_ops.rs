//! File selection helpers for the interactive menu.

use std::{fs, io::BufRead, io::Write, path::Path};

use anyhow::Context;

use crate::{
    console::Console,
    lang::{MessageId, Messages},
};

/// Lists the regular files of `dir`, sorted by name.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn list_files(dir: &Path) -> anyhow::Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Could not open input directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    files.sort();
    debug!("{} files in {}", files.len(), dir.display());
    Ok(files)
}

/// Shows a numbered file list and returns the chosen name.
pub fn prompt_file_selection<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    messages: &Messages,
    files: &[String],
) -> anyhow::Result<String> {
    if files.is_empty() {
        bail!("{}", messages.tr(MessageId::ErrNoFiles));
    }

    console.heading(format!("\n{}:", messages.tr(MessageId::AvailableFiles)))?;
    for (i, name) in files.iter().enumerate() {
        console.println(format!("{}. {name}", i + 1))?;
    }

    let choice: usize = console
        .prompt_parse(messages.tr(MessageId::PromptFileChoice))
        .with_context(|| messages.tr(MessageId::ErrInvalidChoice).to_string())?;
    match choice.checked_sub(1).and_then(|i| files.get(i)) {
        Some(name) => Ok(name.clone()),
        None => bail!("{}", messages.tr(MessageId::ErrInvalidChoice)),
    }
}

/// Asks for an output file name.
pub fn prompt_filename<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    messages: &Messages,
) -> anyhow::Result<String> {
    let name = console.prompt(messages.tr(MessageId::PromptFilename))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("{}", messages.tr(MessageId::ErrInvalidInput));
    }
    Ok(name.to_string())
}

/// Asks whether an existing file may be replaced. Only `y`/`Y` confirms.
pub fn confirm_overwrite<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    messages: &Messages,
    path: &Path,
) -> anyhow::Result<bool> {
    console.println(path.display())?;
    let answer = console.prompt(messages.tr(MessageId::PromptOverwrite))?;
    Ok(matches!(answer.trim(), "y" | "Y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Language;

    #[test]
    fn test_list_files_sorted_without_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        assert_eq!(list_files(dir.path()).unwrap(), vec!["a.txt", "b.txt"]);
        assert!(list_files(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_file_selection() {
        let messages = Messages::new(Language::En);
        let files = vec!["a.txt".to_string(), "b.txt".to_string()];

        let mut console = Console::new("2\n".as_bytes(), Vec::new());
        let picked = prompt_file_selection(&mut console, &messages, &files).unwrap();
        assert_eq!(picked, "b.txt");
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("1. a.txt"));

        for bad in ["0\n", "3\n", "x\n"] {
            let mut console = Console::new(bad.as_bytes(), Vec::new());
            assert!(prompt_file_selection(&mut console, &messages, &files).is_err());
        }

        let mut console = Console::new("".as_bytes(), Vec::new());
        assert!(prompt_file_selection(&mut console, &messages, &[]).is_err());
    }

    #[test]
    fn test_confirm_overwrite() {
        let messages = Messages::new(Language::En);
        let path = Path::new("out.txt");
        let mut yes = Console::new("Y\n".as_bytes(), Vec::new());
        assert!(confirm_overwrite(&mut yes, &messages, path).unwrap());
        let mut no = Console::new("yes\n".as_bytes(), Vec::new());
        assert!(!confirm_overwrite(&mut no, &messages, path).unwrap());
    }

    #[test]
    fn test_prompt_filename_rejects_blank() {
        let messages = Messages::new(Language::En);
        let mut console = Console::new("  \nmap.txt\n".as_bytes(), Vec::new());
        assert!(prompt_filename(&mut console, &messages).is_err());
        assert_eq!(prompt_filename(&mut console, &messages).unwrap(), "map.txt");
    }
}
