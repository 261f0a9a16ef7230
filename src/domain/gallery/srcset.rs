// SPDX-License-Identifier: MPL-2.0
//! Responsive source sets (`url 640w, url 1280w` / `url 2x`).

/// The descriptor attached to one candidate of a source set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CandidateDescriptor {
    /// `640w`
    Width(u32),
    /// `2x`
    Density(f32),
    /// Bare URL.
    None,
}

/// One `url descriptor` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SrcSetCandidate {
    url: String,
    descriptor: CandidateDescriptor,
    raw: String,
}

impl SrcSetCandidate {
    /// Parses a single trimmed candidate. Returns `None` for empty input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let mut parts = raw.split_whitespace();
        let url = parts.next()?.to_string();
        let descriptor = match parts.next() {
            Some(token) => parse_descriptor(token),
            None => CandidateDescriptor::None,
        };
        Some(Self {
            url,
            descriptor,
            raw: raw.to_string(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn descriptor(&self) -> CandidateDescriptor {
        self.descriptor
    }

    fn width(&self) -> Option<u32> {
        match self.descriptor {
            CandidateDescriptor::Width(w) => Some(w),
            _ => None,
        }
    }
}

fn parse_descriptor(token: &str) -> CandidateDescriptor {
    if let Some(width) = token.strip_suffix('w').and_then(|w| w.parse::<u32>().ok()) {
        return CandidateDescriptor::Width(width);
    }
    if let Some(density) = token.strip_suffix('x').and_then(|d| d.parse::<f32>().ok()) {
        return CandidateDescriptor::Density(density);
    }
    CandidateDescriptor::None
}

/// Ordered list of responsive candidates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SrcSet {
    candidates: Vec<SrcSetCandidate>,
}

impl SrcSet {
    /// Parses the comma-separated string form.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self {
            candidates: value.split(',').filter_map(SrcSetCandidate::parse).collect(),
        }
    }

    /// Builds a set from already-split entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            candidates: entries
                .into_iter()
                .filter_map(|entry| SrcSetCandidate::parse(entry.as_ref()))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[must_use]
    pub fn candidates(&self) -> &[SrcSetCandidate] {
        &self.candidates
    }

    /// Picks the smallest width candidate that is at least `display_width`
    /// wide, or the widest one if none is large enough.
    ///
    /// Returns `None` when no candidate carries a width descriptor.
    #[must_use]
    pub fn select(&self, display_width: u32) -> Option<&str> {
        let with_width = || {
            self.candidates
                .iter()
                .filter_map(|c| c.width().map(|w| (w, c)))
        };

        with_width()
            .filter(|(w, _)| *w >= display_width)
            .min_by_key(|(w, _)| *w)
            .or_else(|| with_width().max_by_key(|(w, _)| *w))
            .map(|(_, c)| c.url())
    }

    /// Formats the set back into its attribute form, entries joined by `", "`.
    #[must_use]
    pub fn to_attribute(&self) -> String {
        self.candidates
            .iter()
            .map(|c| c.raw.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_width_and_density_descriptors() {
        let set = SrcSet::parse("a.jpg 640w, b.jpg 2x, c.jpg");
        let descriptors: Vec<_> = set.candidates().iter().map(|c| c.descriptor()).collect();
        assert_eq!(
            descriptors,
            vec![
                CandidateDescriptor::Width(640),
                CandidateDescriptor::Density(2.0),
                CandidateDescriptor::None,
            ]
        );
    }

    #[test]
    fn parse_skips_empty_entries() {
        let set = SrcSet::parse(" , a.jpg 100w,,");
        assert_eq!(set.candidates().len(), 1);
    }

    #[test]
    fn list_and_string_forms_format_identically() {
        let from_list = SrcSet::from_entries(["a.jpg 640w", "b.jpg 1280w"]);
        let from_string = SrcSet::parse("a.jpg 640w,b.jpg 1280w");
        assert_eq!(from_list.to_attribute(), "a.jpg 640w, b.jpg 1280w");
        assert_eq!(from_string.to_attribute(), from_list.to_attribute());
    }

    #[test]
    fn select_picks_smallest_sufficient_width() {
        let set = SrcSet::parse("s.jpg 480w, m.jpg 1024w, l.jpg 2048w");
        assert_eq!(set.select(300), Some("s.jpg"));
        assert_eq!(set.select(1024), Some("m.jpg"));
        assert_eq!(set.select(1300), Some("l.jpg"));
        assert_eq!(set.select(4000), Some("l.jpg"));
    }

    #[test]
    fn select_without_width_candidates_is_none() {
        assert_eq!(SrcSet::parse("a.jpg 1x, b.jpg 2x").select(800), None);
        assert_eq!(SrcSet::default().select(800), None);
    }
}
