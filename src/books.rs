//! Centralized book-name tables shared by every converter.
//!
//! All stages agree on one canonical spelling per book ("Genesis",
//! "1 Samuel", "Song of Solomon", ...). This module owns the lookup
//! tables that map source-specific spellings onto it:
//!
//! - Project Gutenberg long titles ("The First Book of Moses: Called
//!   Genesis") → canonical name
//! - USFM 3-letter book codes ("GEN", "1SA", ...) → canonical name,
//!   in canonical book order
//!
//! Keeping these in one place means the Gutenberg and USFM converters
//! can never drift on spelling, and the canonical-format parser has a
//! single authority for "is this line a book header?".

/// USFM book codes paired with canonical names, in canonical order.
///
/// The slice order IS the canonical book order (Genesis → Revelation);
/// [`usfm_order`] returns an index into it.
pub const USFM_BOOKS: &[(&str, &str)] = &[
    ("GEN", "Genesis"),
    ("EXO", "Exodus"),
    ("LEV", "Leviticus"),
    ("NUM", "Numbers"),
    ("DEU", "Deuteronomy"),
    ("JOS", "Joshua"),
    ("JDG", "Judges"),
    ("RUT", "Ruth"),
    ("1SA", "1 Samuel"),
    ("2SA", "2 Samuel"),
    ("1KI", "1 Kings"),
    ("2KI", "2 Kings"),
    ("1CH", "1 Chronicles"),
    ("2CH", "2 Chronicles"),
    ("EZR", "Ezra"),
    ("NEH", "Nehemiah"),
    ("EST", "Esther"),
    ("JOB", "Job"),
    ("PSA", "Psalms"),
    ("PRO", "Proverbs"),
    ("ECC", "Ecclesiastes"),
    ("SNG", "Song of Solomon"),
    ("ISA", "Isaiah"),
    ("JER", "Jeremiah"),
    ("LAM", "Lamentations"),
    ("EZK", "Ezekiel"),
    ("DAN", "Daniel"),
    ("HOS", "Hosea"),
    ("JOL", "Joel"),
    ("AMO", "Amos"),
    ("OBA", "Obadiah"),
    ("JON", "Jonah"),
    ("MIC", "Micah"),
    ("NAM", "Nahum"),
    ("HAB", "Habakkuk"),
    ("ZEP", "Zephaniah"),
    ("HAG", "Haggai"),
    ("ZEC", "Zechariah"),
    ("MAL", "Malachi"),
    ("MAT", "Matthew"),
    ("MRK", "Mark"),
    ("LUK", "Luke"),
    ("JHN", "John"),
    ("ACT", "Acts"),
    ("ROM", "Romans"),
    ("1CO", "1 Corinthians"),
    ("2CO", "2 Corinthians"),
    ("GAL", "Galatians"),
    ("EPH", "Ephesians"),
    ("PHP", "Philippians"),
    ("COL", "Colossians"),
    ("1TH", "1 Thessalonians"),
    ("2TH", "2 Thessalonians"),
    ("1TI", "1 Timothy"),
    ("2TI", "2 Timothy"),
    ("TIT", "Titus"),
    ("PHM", "Philemon"),
    ("HEB", "Hebrews"),
    ("JAS", "James"),
    ("1PE", "1 Peter"),
    ("2PE", "2 Peter"),
    ("1JN", "1 John"),
    ("2JN", "2 John"),
    ("3JN", "3 John"),
    ("JUD", "Jude"),
    ("REV", "Revelation"),
];

/// Project Gutenberg long titles → canonical names.
pub const GUTENBERG_TITLES: &[(&str, &str)] = &[
    ("The First Book of Moses: Called Genesis", "Genesis"),
    ("The Second Book of Moses: Called Exodus", "Exodus"),
    ("The Third Book of Moses: Called Leviticus", "Leviticus"),
    ("The Fourth Book of Moses: Called Numbers", "Numbers"),
    ("The Fifth Book of Moses: Called Deuteronomy", "Deuteronomy"),
    ("The Book of Joshua", "Joshua"),
    ("The Book of Judges", "Judges"),
    ("The Book of Ruth", "Ruth"),
    ("The First Book of Samuel", "1 Samuel"),
    ("The Second Book of Samuel", "2 Samuel"),
    ("The First Book of the Kings", "1 Kings"),
    ("The Second Book of the Kings", "2 Kings"),
    ("The First Book of the Chronicles", "1 Chronicles"),
    ("The Second Book of the Chronicles", "2 Chronicles"),
    ("Ezra", "Ezra"),
    ("The Book of Nehemiah", "Nehemiah"),
    ("The Book of Esther", "Esther"),
    ("The Book of Job", "Job"),
    ("The Book of Psalms", "Psalms"),
    ("The Proverbs", "Proverbs"),
    ("Ecclesiastes", "Ecclesiastes"),
    ("The Song of Solomon", "Song of Solomon"),
    ("The Book of the Prophet Isaiah", "Isaiah"),
    ("The Book of the Prophet Jeremiah", "Jeremiah"),
    ("The Lamentations of Jeremiah", "Lamentations"),
    ("The Book of the Prophet Ezekiel", "Ezekiel"),
    ("The Book of Daniel", "Daniel"),
    ("Hosea", "Hosea"),
    ("Joel", "Joel"),
    ("Amos", "Amos"),
    ("Obadiah", "Obadiah"),
    ("Jonah", "Jonah"),
    ("Micah", "Micah"),
    ("Nahum", "Nahum"),
    ("Habakkuk", "Habakkuk"),
    ("Zephaniah", "Zephaniah"),
    ("Haggai", "Haggai"),
    ("Zechariah", "Zechariah"),
    ("Malachi", "Malachi"),
    ("The Gospel According to Saint Matthew", "Matthew"),
    ("The Gospel According to Saint Mark", "Mark"),
    ("The Gospel According to Saint Luke", "Luke"),
    ("The Gospel According to Saint John", "John"),
    ("The Acts of the Apostles", "Acts"),
    ("The Epistle of Paul the Apostle to the Romans", "Romans"),
    (
        "The First Epistle of Paul the Apostle to the Corinthians",
        "1 Corinthians",
    ),
    (
        "The Second Epistle of Paul the Apostle to the Corinthians",
        "2 Corinthians",
    ),
    ("The Epistle of Paul the Apostle to the Galatians", "Galatians"),
    ("The Epistle of Paul the Apostle to the Ephesians", "Ephesians"),
    (
        "The Epistle of Paul the Apostle to the Philippians",
        "Philippians",
    ),
    (
        "The Epistle of Paul the Apostle to the Colossians",
        "Colossians",
    ),
    (
        "The First Epistle of Paul the Apostle to the Thessalonians",
        "1 Thessalonians",
    ),
    (
        "The Second Epistle of Paul the Apostle to the Thessalonians",
        "2 Thessalonians",
    ),
    ("The First Epistle of Paul the Apostle to Timothy", "1 Timothy"),
    ("The Second Epistle of Paul the Apostle to Timothy", "2 Timothy"),
    ("The Epistle of Paul the Apostle to Titus", "Titus"),
    ("The Epistle of Paul the Apostle to Philemon", "Philemon"),
    ("The Epistle of Paul the Apostle to the Hebrews", "Hebrews"),
    ("The General Epistle of James", "James"),
    ("The First Epistle General of Peter", "1 Peter"),
    ("The Second General Epistle of Peter", "2 Peter"),
    ("The First Epistle General of John", "1 John"),
    ("The Second Epistle General of John", "2 John"),
    ("The Third Epistle General of John", "3 John"),
    ("The General Epistle of Jude", "Jude"),
    ("The Revelation of Saint John the Divine", "Revelation"),
];

/// Canonical name for a Gutenberg long-title line, if the line matches
/// one exactly.
pub fn from_gutenberg_title(line: &str) -> Option<&'static str> {
    GUTENBERG_TITLES
        .iter()
        .find(|(title, _)| *title == line)
        .map(|(_, name)| *name)
}

/// Canonical name for a USFM book code.
pub fn from_usfm_code(code: &str) -> Option<&'static str> {
    USFM_BOOKS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Position of a USFM book code in canonical order.
pub fn usfm_order(code: &str) -> Option<usize> {
    USFM_BOOKS.iter().position(|(c, _)| *c == code)
}

/// Detect the USFM book code embedded in a filename ("02-GENeng.usfm",
/// "1SA.usfm"). Codes match case-insensitively, but only at the start
/// of the name or after a non-letter, so a name like "frontmatter"
/// never reads as Matthew.
pub fn code_from_filename(filename: &str) -> Option<&'static str> {
    let upper = filename.to_uppercase();
    let bytes = upper.as_bytes();
    USFM_BOOKS
        .iter()
        .find(|(code, _)| {
            upper
                .match_indices(code)
                .any(|(at, _)| at == 0 || !bytes[at - 1].is_ascii_alphabetic())
        })
        .map(|(code, _)| *code)
}

/// True if `name` is one of the 66 canonical book names.
pub fn is_canonical_book(name: &str) -> bool {
    USFM_BOOKS.iter().any(|(_, n)| *n == name)
}
