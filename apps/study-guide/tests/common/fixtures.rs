//! Markdown fixtures and factory functions for test data.

use std::fs;
use std::path::Path;
use study_core::{Difficulty, GeneratedQuestion, QuestionType};

pub const MESOPOTAMIA: &str = "# Ancient Mesopotamia

## Overview
Hammurabi ruled Babylon from 1792 BCE. The Akkadians conquered Sumer.
King Sargon founded the Akkadian Empire. Uruk grew around 3500 BC.

## KEY TERMS
### Ziggurat
A stepped temple tower. The Sumerians built massive ziggurats in every important city.
- Served as the center of religious life in the city
### Cuneiform
The earliest known writing system, developed by Sumerian scribes on clay tablets.

## Review
1. Who wrote the famous law code? **Hammurabi**
2. Which rivers framed Mesopotamia? **Tigris and Euphrates**
";

pub const CELLS: &str = "# Cells

## Parts of the Cell
**Nucleus**: Control center that holds the genetic material.
**Mitochondria**: Organelles that produce energy for the cell.
";

/// Nothing in here yields a question or a flashcard.
pub const BLANK: &str = "just some lowercase words without any structure\n";

/// Write the fixture subjects tree:
///
/// ```text
/// Art/Blank.md
/// History/Mesopotamia.md
/// History/notes.txt
/// Science/Cells.markdown
/// ```
pub fn write_subjects(root: &Path) {
    let files = [
        ("Art/Blank.md", BLANK),
        ("History/Mesopotamia.md", MESOPOTAMIA),
        ("History/notes.txt", "not a topic"),
        ("Science/Cells.markdown", CELLS),
    ];
    for (file, content) in files {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// A minimal question with a fixed answer.
pub fn question(text: &str, answer: &str) -> GeneratedQuestion {
    GeneratedQuestion {
        question: text.to_string(),
        answer: answer.to_string(),
        kind: QuestionType::Embedded,
        difficulty: Difficulty::Medium,
        term: None,
        section: None,
    }
}
