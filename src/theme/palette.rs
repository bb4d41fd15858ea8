//! Built-in palettes.

use std::collections::BTreeMap;

use super::{ColorSpec, Role, Theme};

type Palette = [(Role, &'static str); 15];

const DEFAULT: Palette = [
    (Role::Header, "white on blue"),
    (Role::Footer, "white on blue"),
    (Role::Border, "white"),
    (Role::Title, "white"),
    (Role::Text, "white"),
    (Role::Highlight, "cyan"),
    (Role::Cpu, "blue"),
    (Role::Memory, "magenta"),
    (Role::Network, "green"),
    (Role::Disk, "yellow"),
    (Role::Process, "cyan"),
    (Role::Graph, "blue"),
    (Role::ProgressLow, "green"),
    (Role::ProgressMedium, "yellow"),
    (Role::ProgressHigh, "red"),
];

const NORD: Palette = [
    (Role::Header, "black on cyan"),
    (Role::Footer, "black on cyan"),
    (Role::Border, "#81A1C1"),
    (Role::Title, "#88C0D0"),
    (Role::Text, "#D8DEE9"),
    (Role::Highlight, "#81A1C1"),
    (Role::Cpu, "#5E81AC"),
    (Role::Memory, "#B48EAD"),
    (Role::Network, "#A3BE8C"),
    (Role::Disk, "#EBCB8B"),
    (Role::Process, "#88C0D0"),
    (Role::Graph, "#81A1C1"),
    (Role::ProgressLow, "#A3BE8C"),
    (Role::ProgressMedium, "#EBCB8B"),
    (Role::ProgressHigh, "#BF616A"),
];

const DRACULA: Palette = [
    (Role::Header, "white on purple"),
    (Role::Footer, "white on purple"),
    (Role::Border, "#BD93F9"),
    (Role::Title, "#FF79C6"),
    (Role::Text, "#F8F8F2"),
    (Role::Highlight, "#8BE9FD"),
    (Role::Cpu, "#BD93F9"),
    (Role::Memory, "#FF79C6"),
    (Role::Network, "#50FA7B"),
    (Role::Disk, "#F1FA8C"),
    (Role::Process, "#8BE9FD"),
    (Role::Graph, "#BD93F9"),
    (Role::ProgressLow, "#50FA7B"),
    (Role::ProgressMedium, "#FFB86C"),
    (Role::ProgressHigh, "#FF5555"),
];

const GRUVBOX: Palette = [
    (Role::Header, "black on yellow"),
    (Role::Footer, "black on yellow"),
    (Role::Border, "#928374"),
    (Role::Title, "#b8bb26"),
    (Role::Text, "#ebdbb2"),
    (Role::Highlight, "#83a598"),
    (Role::Cpu, "#458588"),
    (Role::Memory, "#b16286"),
    (Role::Network, "#98971a"),
    (Role::Disk, "#d79921"),
    (Role::Process, "#83a598"),
    (Role::Graph, "#928374"),
    (Role::ProgressLow, "#98971a"),
    (Role::ProgressMedium, "#d79921"),
    (Role::ProgressHigh, "#cc241d"),
];

const BUILTIN: [(&str, &Palette); 4] = [
    ("default", &DEFAULT),
    ("nord", &NORD),
    ("dracula", &DRACULA),
    ("gruvbox", &GRUVBOX),
];

/// Styles of the default palette, used for roles a theme leaves out.
pub(super) fn fallback_styles() -> BTreeMap<Role, ColorSpec> {
    DEFAULT
        .iter()
        .filter_map(|&(role, token)| ColorSpec::parse(token).ok().map(|spec| (role, spec)))
        .collect()
}

pub(super) fn builtin_themes() -> Vec<Theme> {
    BUILTIN
        .iter()
        .filter_map(|(name, palette)| Theme::from_tokens(name, palette.iter().copied()).ok())
        .collect()
}
