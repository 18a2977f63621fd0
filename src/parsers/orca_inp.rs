//! # ORCA 输入文件 (.inp) 读写
//!
//! ## 文件格式
//! ```text
//! ! B3LYP def2-SVP Opt
//! %pal nprocs 4 end
//! !MORead
//! %moinp "guess.gbw"
//!
//! * xyz 0 1
//! O         0.00000    0.00000    0.11779
//! H         0.00000    0.75545   -0.47116
//! H         0.00000   -0.75545   -0.47116
//! *
//! ```
//! `!MORead` / `%moinp` 两行仅在指定初始猜测轨道时出现。
//!
//! ## 依赖关系
//! - 被 `commands/input.rs`, `commands/run.rs` 使用
//! - 使用 `parsers/xyz.rs` 的原子行格式

use crate::error::{OrcaToolsError, Result};
use crate::models::Geometry;
use crate::parsers::xyz::{format_atom_line, parse_atom_line};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `* xyz <charge> <mult>`
static XYZ_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\*\s*xyz\s+(-?\d+)\s+(\d+)\s*$").expect("valid xyz header regex")
});

/// `%moinp "<file>"`
static MOINP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^%moinp\s+"([^"]*)""#).expect("valid moinp regex"));

/// ORCA 输入文件
#[derive(Debug, Clone, PartialEq)]
pub struct OrcaInput {
    /// `!` 开头的关键词行
    pub simple_input: String,
    /// `%` 块输入
    pub block_input: String,
    pub charge: i32,
    pub multiplicity: u32,
    pub geometry: Geometry,
    /// 初始猜测轨道文件 (.gbw)
    pub guess: Option<PathBuf>,
}

impl OrcaInput {
    /// 创建输入文件，关键词和块输入可以是文本或文件路径
    pub fn new(simple_input: &str, block_input: &str, geometry: Geometry) -> Result<Self> {
        if geometry.is_empty() {
            return Err(OrcaToolsError::InvalidGeometryInput(
                "input deck needs at least one atom".to_string(),
            ));
        }

        let simple_input = resolve_text(simple_input)?;
        let simple_input = if simple_input.trim_start().starts_with('!') {
            simple_input.trim().to_string()
        } else {
            format!("! {}", simple_input.trim())
        };

        Ok(OrcaInput {
            simple_input,
            block_input: resolve_text(block_input)?.trim().to_string(),
            charge: 0,
            multiplicity: 1,
            geometry,
            guess: None,
        })
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_multiplicity(mut self, multiplicity: u32) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    pub fn with_guess(mut self, guess: impl Into<PathBuf>) -> Self {
        self.guess = Some(guess.into());
        self
    }

    /// 生成输入文件文本
    pub fn render(&self) -> String {
        let mut deck = String::new();

        deck.push_str(&format!("{}\n{}\n", self.simple_input, self.block_input));
        if let Some(guess) = &self.guess {
            deck.push_str(&format!("!MORead\n%moinp \"{}\"\n\n", guess.display()));
        }
        deck.push_str(&format!("* xyz {} {}\n", self.charge, self.multiplicity));
        for atom in &self.geometry {
            deck.push_str(&format_atom_line(atom));
            deck.push('\n');
        }
        deck.push_str("*\n");

        deck
    }

    /// 写入 .inp 文件
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()).map_err(|e| OrcaToolsError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// 读取 .inp 文件
    pub fn read_deck(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| OrcaToolsError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        parse_deck_from(&content, &path.display().to_string())
    }

    /// 从文本解析输入文件
    pub fn parse_deck(content: &str) -> Result<Self> {
        parse_deck_from(content, "<inline>")
    }
}

/// 文本或文件路径：单行且指向已存在文件时读取文件内容
fn resolve_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains('\n') {
        return Ok(trimmed.to_string());
    }

    let path = Path::new(trimmed);
    if path.is_file() {
        return fs::read_to_string(path).map_err(|e| OrcaToolsError::FileReadError {
            path: path.display().to_string(),
            source: e,
        });
    }

    Ok(trimmed.to_string())
}

fn parse_deck_from(content: &str, source: &str) -> Result<OrcaInput> {
    let parse_error = |reason: String| OrcaToolsError::ParseError {
        format: "ORCA input".to_string(),
        path: source.to_string(),
        reason,
    };

    let mut simple = Vec::new();
    let mut blocks = Vec::new();
    let mut guess = None;
    let mut lines = content.lines();
    let mut charge_mult = None;

    for line in lines.by_ref() {
        let trimmed = line.trim();
        if let Some(caps) = XYZ_HEADER.captures(trimmed) {
            let charge = caps[1]
                .parse::<i32>()
                .map_err(|e| parse_error(format!("invalid charge: {}", e)))?;
            let mult = caps[2]
                .parse::<u32>()
                .map_err(|e| parse_error(format!("invalid multiplicity: {}", e)))?;
            charge_mult = Some((charge, mult));
            break;
        }

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("!moread") {
            continue;
        }
        if let Some(caps) = MOINP.captures(trimmed) {
            guess = Some(PathBuf::from(&caps[1]));
        } else if trimmed.starts_with('!') {
            simple.push(trimmed);
        } else {
            blocks.push(line.trim_end());
        }
    }

    let (charge, multiplicity) =
        charge_mult.ok_or_else(|| parse_error("no '* xyz <charge> <mult>' line".to_string()))?;

    let mut atoms = Vec::new();
    let mut closed = false;
    for line in lines {
        let trimmed = line.trim();
        if trimmed == "*" {
            closed = true;
            break;
        }
        if trimmed.is_empty() {
            continue;
        }
        let atom = parse_atom_line(trimmed)
            .ok_or_else(|| parse_error(format!("invalid atom line '{}'", trimmed)))?;
        atoms.push(atom);
    }

    if !closed {
        return Err(parse_error("geometry block is not closed by '*'".to_string()));
    }
    if atoms.is_empty() {
        return Err(parse_error("geometry block is empty".to_string()));
    }

    Ok(OrcaInput {
        simple_input: simple.join("\n"),
        block_input: blocks.join("\n"),
        charge,
        multiplicity,
        geometry: Geometry::new(atoms),
        guess,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Atom;

    fn water() -> Geometry {
        Geometry::new(vec![
            Atom::new("O", [0.0, 0.0, 0.117790]),
            Atom::new("H", [0.0, 0.755453, -0.471161]),
            Atom::new("H", [0.0, -0.755453, -0.471161]),
        ])
    }

    #[test]
    fn test_render_deck() {
        let deck = OrcaInput::new("! B3LYP def2-SVP", "%pal nprocs 4 end", water())
            .unwrap()
            .render();

        let expected = "! B3LYP def2-SVP\n\
                        %pal nprocs 4 end\n\
                        * xyz 0 1\n\
                        O         0.00000    0.00000    0.11779\n\
                        H         0.00000    0.75545   -0.47116\n\
                        H         0.00000   -0.75545   -0.47116\n\
                        *\n";
        assert_eq!(deck, expected);
    }

    #[test]
    fn test_render_with_guess_and_charge() {
        let deck = OrcaInput::new("CASSCF(2,2) def2-TZVP", "", water())
            .unwrap()
            .with_charge(-1)
            .with_multiplicity(2)
            .with_guess("start.gbw")
            .render();

        assert!(deck.starts_with("! CASSCF(2,2) def2-TZVP\n\n!MORead\n%moinp \"start.gbw\"\n\n"));
        assert!(deck.contains("* xyz -1 2\n"));
        assert!(deck.ends_with("*\n"));
    }

    #[test]
    fn test_blocks_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocks.txt");
        fs::write(&path, "%scf\n  maxiter 200\nend\n").unwrap();

        let input = OrcaInput::new("! HF", path.to_str().unwrap(), water()).unwrap();
        assert_eq!(input.block_input, "%scf\n  maxiter 200\nend");
    }

    #[test]
    fn test_parse_deck_round_trip() {
        let input = OrcaInput::new("! B3LYP def2-SVP\n! TightSCF", "%pal nprocs 4 end", water())
            .unwrap()
            .with_charge(1)
            .with_multiplicity(2)
            .with_guess("guess.gbw");

        let parsed = OrcaInput::parse_deck(&input.render()).unwrap();
        assert_eq!(parsed.simple_input, input.simple_input);
        assert_eq!(parsed.block_input, input.block_input);
        assert_eq!(parsed.charge, 1);
        assert_eq!(parsed.multiplicity, 2);
        assert_eq!(parsed.guess, Some(PathBuf::from("guess.gbw")));
        assert_eq!(parsed.geometry.len(), 3);
        for (a, b) in parsed.geometry.iter().zip(water().iter()) {
            assert_eq!(a.label, b.label);
            for k in 0..3 {
                assert!((a.position[k] - b.position[k]).abs() <= 1e-5);
            }
        }
    }

    #[test]
    fn test_write_and_read_deck() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.inp");
        let input = OrcaInput::new("! HF STO-3G", "", water()).unwrap();
        input.write(&path).unwrap();

        let parsed = OrcaInput::read_deck(&path).unwrap();
        assert_eq!(parsed.simple_input, "! HF STO-3G");
        assert_eq!(parsed.block_input, "");
        assert_eq!(parsed.guess, None);
    }

    #[test]
    fn test_parse_deck_errors() {
        assert!(matches!(
            OrcaInput::parse_deck("! HF\nO 0 0 0\n*\n"),
            Err(OrcaToolsError::ParseError { .. })
        ));
        assert!(matches!(
            OrcaInput::parse_deck("! HF\n* xyz 0 1\nO 0.0 0.0 0.0\n"),
            Err(OrcaToolsError::ParseError { .. })
        ));
        assert!(matches!(
            OrcaInput::parse_deck("! HF\n* xyz 0 1\nO zero 0.0 0.0\n*\n"),
            Err(OrcaToolsError::ParseError { .. })
        ));
    }

    #[test]
    fn test_empty_geometry_rejected() {
        assert!(matches!(
            OrcaInput::new("! HF", "", Geometry::default()),
            Err(OrcaToolsError::InvalidGeometryInput(_))
        ));
    }

    #[test]
    fn test_deck_line_patterns() {
        let caps = XYZ_HEADER.captures("* XYZ -1 2").unwrap();
        assert_eq!(&caps[1], "-1");
        assert_eq!(&caps[2], "2");
        assert!(!XYZ_HEADER.is_match("* xyzfile 0 1 geom.xyz"));

        let caps = MOINP.captures(r#"%MOINP "run 1/guess.gbw""#).unwrap();
        assert_eq!(&caps[1], "run 1/guess.gbw");

        let first = OrcaInput::parse_deck("! HF\n* xyz -1 2\nCl 0.0 0.0 0.0\n*\n").unwrap();
        let second = OrcaInput::parse_deck("! HF\n* xyz 0 1\nO 0.0 0.0 0.0\n*\n").unwrap();
        assert_eq!((first.charge, first.multiplicity), (-1, 2));
        assert_eq!((second.charge, second.multiplicity), (0, 1));
    }
}
