//! The fixed catalog of installable font packages.
//!
//! The catalog mirrors the package directories published by the
//! ProgrammingFonts repository. It is compiled into the binary and never
//! mutated; searching produces borrowed subsequences of it.

mod search;

pub use search::filter;

/// Every known font package, in display order.
pub const FONT_PACKAGES: &[&str] = &[
    "3270-font",
    "agave",
    "anka-coder",
    "anonymous-pro",
    "apl-2741",
    "apl-385",
    "aurulent",
    "average",
    "b612-mono",
    "bedstead",
    "bitstream-vera",
    "borg-sans-mono",
    "bpmono",
    "bront-dejavu",
    "bront-ubuntu",
    "camingo-code",
    "cascadia-code",
    "Classic-X11-6x13",
    "code-new-roman",
    "consolamono",
    "Consolas",
    "Courier-New",
    "courier-prime",
    "courier-prime-code",
    "Cousine",
    "Crystal",
    "cutive",
    "d2coding",
    "daddytimemono",
    "dank-mono",
    "DEC-Terminal-Modern",
    "Deja-Vu-Sans-Mono",
    "Dina",
    "DM_Mono",
    "Droid-Sans-Mono",
    "Edlo",
    "effects-eighty",
    "Envy Code R PR7",
    "envy-code-r",
    "EspressoMono",
    "fairfax",
    "fairfax-hd",
    "fairfax-serif",
    "FantasqueSansMono",
    "fifteen",
    "fira",
    "Fira-Code",
    "FiraFlott",
    "fixedsys",
    "fixedsys-ligatures",
    "generic",
    "Generic Mono",
    "gnu-freefont",
    "gohufont",
    "go-mono",
    "Hack",
    "Hasklig",
    "Hermit",
    "ia-writer-mono",
    "IBM Plex Mono",
    "Inconsolata",
    "Input",
    "Inter-UI-3",
    "iosevka",
    "Jetbrains Mono",
    "JuliaMono",
    "latin-modern",
    "league",
    "lekton",
    "liberation",
    "Luculent",
    "luxi",
    "M+",
    "Menlo",
    "mensch",
    "meslo",
    "Microsoft-YaHei-Mono",
    "Monaco",
    "Monofur",
    "Monoid",
    "MonoLisa",
    "Mononoki",
    "nanum-gothic-coding",
    "notcouriersans",
    "noto",
    "nova",
    "office-code-pro",
    "Overpass Mono",
    "Oxygen-Mono",
    "plex-mono",
    "Pragmata-Pro",
    "profont",
    "Proggy",
    "Pt-Mono",
    "recursive",
    "RedHatMono",
    "Ricty-Diminished",
    "Roboto_Mono",
    "Sarasa-Gothic",
    "saxMono",
    "SomeType-Mono",
    "Source-Code-Pro",
    "space",
    "Triskweline",
    "Ubuntu-Mono",
    "Unifont",
    "Victor Mono",
    "Vintage Fonts Pack",
];

/// Read-only view over an ordered list of package names.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    names: &'static [&'static str],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The compiled-in catalog.
    pub const fn builtin() -> Self {
        Self {
            names: FONT_PACKAGES,
        }
    }

    /// A catalog over an arbitrary static list.
    pub const fn from_static(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    /// All names in catalog order.
    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| *n == name)
    }

    /// Names matching `query`, see [`filter`].
    pub fn filter(&self, query: &str) -> Vec<&'static str> {
        filter(self.names, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_populated() {
        let catalog = Catalog::builtin();
        assert!(catalog.len() > 100);
        assert_eq!(catalog.names()[0], "3270-font");
        assert_eq!(catalog.names()[catalog.len() - 1], "Vintage Fonts Pack");
    }

    #[test]
    fn test_contains_is_exact() {
        let catalog = Catalog::builtin();
        assert!(catalog.contains("Hack"));
        assert!(catalog.contains("Envy Code R PR7"));
        assert!(!catalog.contains("hack"));
        assert!(!catalog.contains("Comic Sans"));
    }

    #[test]
    fn test_catalog_filter_delegates() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.filter("jetbrains"), vec!["Jetbrains Mono"]);
        assert_eq!(catalog.filter("").len(), catalog.len());
    }

    #[test]
    fn test_from_static() {
        static NAMES: &[&str] = &["alpha", "beta"];
        let catalog = Catalog::from_static(NAMES);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.names(), NAMES);
    }
}
