//! # 分子几何结构数据模型
//!
//! 笛卡尔坐标 (Å) 下的有序原子列表。原子顺序有意义：两个几何结构中
//! 相同下标的原子被视为同一个物理原子（插值依赖这一点）。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `interpolate/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 幽灵原子 / 虚原子标签的后缀
const GHOST_MARKERS: [char; 2] = [':', '*'];

/// 原子信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// 原子标签（元素符号，可带幽灵原子后缀，如 `H:`）
    pub label: String,

    /// 笛卡尔坐标 [x, y, z] (Å)
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(label: impl Into<String>, position: [f64; 3]) -> Self {
        Atom {
            label: label.into(),
            position,
        }
    }

    /// 去掉幽灵原子后缀的元素符号
    pub fn element(&self) -> &str {
        self.label.trim_end_matches(GHOST_MARKERS)
    }

    /// 是否为幽灵原子 / 虚原子
    pub fn is_ghost(&self) -> bool {
        self.label.ends_with(GHOST_MARKERS)
    }
}

/// 分子几何结构
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// 原子列表（顺序有意义）
    pub atoms: Vec<Atom>,
}

impl Geometry {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Geometry { atoms }
    }

    /// 原子数
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    /// 计算化学式（幽灵原子不计入）
    pub fn formula(&self) -> String {
        use std::collections::BTreeMap;
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for atom in self.atoms.iter().filter(|a| !a.is_ghost()) {
            *counts.entry(atom.element()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(el, count)| {
                if count == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, count)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

impl From<Vec<Atom>> for Geometry {
    fn from(atoms: Vec<Atom>) -> Self {
        Geometry::new(atoms)
    }
}

impl<'a> IntoIterator for &'a Geometry {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ghost_atom_label() {
        let atom = Atom::new("H:", [0.0, 0.0, 0.0]);
        assert!(atom.is_ghost());
        assert_eq!(atom.element(), "H");

        let atom = Atom::new("O", [0.0, 0.0, 0.0]);
        assert!(!atom.is_ghost());
        assert_eq!(atom.element(), "O");
    }

    #[test]
    fn test_geometry_formula() {
        let geom = Geometry::new(vec![
            Atom::new("O", [0.0, 0.0, 0.1178]),
            Atom::new("H", [0.0, 0.7555, -0.4712]),
            Atom::new("H", [0.0, -0.7555, -0.4712]),
            Atom::new("He*", [3.0, 0.0, 0.0]),
        ]);

        assert_eq!(geom.len(), 4);
        assert_eq!(geom.formula(), "H2O");
    }
}
