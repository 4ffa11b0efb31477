//! Load orchestration
//!
//! One load is one sequential call. Ordering is fixed because each step's
//! side effects are visible to later steps: style before the score document
//! so relative units resolve, chord lists before structural parsing so chord
//! symbols resolve, the main document before excerpts so the link table is
//! populated, audio last because the slot is declared during structural
//! parsing.

use crate::config::ReaderConfig;
use crate::{Error, Result};
use scorepack_container::{ImageStore, ScoreContainer};
use scorepack_format::{
    DefaultStyleSeeder, MODERN_VERSION, ROOT_ELEMENT, StrategyTable, StyleSeeder, XmlStream,
    apply_chord_list, apply_style, read_document, read_modern,
};
use scorepack_model::{Excerpt, MasterScore, ReadContext, Score, SettingsCompat};
use tracing::{debug, info, warn};

/// Result of one load: the captured outcome plus the settings-compatibility
/// data moved out of the load's read context.
#[derive(Debug)]
pub struct LoadReport {
    /// Outcome of the main score-document parse. Excerpt assembly and audio
    /// attachment never override it.
    pub outcome: Result<()>,

    /// Settings whose shape changed across versions, accumulated during the
    /// parse. Consumed once by the caller.
    pub settings: SettingsCompat,
}

impl LoadReport {
    /// Whether the load succeeded.
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Loads score packages into master documents.
pub struct ScoreReader<'a> {
    config: ReaderConfig,
    images: &'a ImageStore,
    table: StrategyTable,
}

impl<'a> ScoreReader<'a> {
    /// Create a reader with the given configuration and image store.
    pub fn new(config: ReaderConfig, images: &'a ImageStore) -> Self {
        Self {
            config,
            images,
            table: StrategyTable::standard(),
        }
    }

    /// Load `container` into `master`.
    pub fn load(&self, master: &mut MasterScore, container: &dyn ScoreContainer) -> LoadReport {
        if !container.is_opened() {
            return LoadReport {
                outcome: Err(Error::file_open(container.file_path().display().to_string())),
                settings: SettingsCompat::default(),
            };
        }

        let doc_name = doc_name_for(master, container);

        // Style first: structural parsing resolves relative units against
        // it.
        let style_data = container.read_style_file();
        if !style_data.is_empty() {
            apply_style(&mut master.style, &style_data, &doc_name);
        }

        // Chord list before structural parsing so chord symbols resolve.
        let chord_list_data = container.read_chord_list_file();
        if !chord_list_data.is_empty() {
            apply_chord_list(&mut master.chord_list, &chord_list_data, &doc_name);
        }

        if !self.config.skip_images {
            for name in container.image_file_names() {
                self.images.add(&name, container.read_image_file(&name));
            }
        }

        let mut ctx = ReadContext::new(&doc_name);
        ctx.set_ignore_version_error(self.config.ignore_version_error);

        let score_data = container.read_score_file();
        let seeder = DefaultStyleSeeder;
        let mut xml = XmlStream::new(&score_data, &doc_name);
        let outcome = read_document(
            master,
            &mut xml,
            &mut ctx,
            Some(&seeder),
            &self.table,
            self.config.test_mode,
        )
        .map_err(Error::from);

        // Excerpts only exist from the modern generation onward; legacy
        // documents have no excerpts section by construction.
        if outcome.is_ok() && master.msc_version >= MODERN_VERSION {
            self.read_excerpts(master, container, &ctx);
        }

        if let Some(audio) = master.audio.as_mut() {
            let audio_data = container.read_audio_file();
            if !audio_data.is_empty() {
                audio.set_data(audio_data);
            }
        }

        let settings = ctx.into_settings();

        match &outcome {
            Ok(()) => info!(
                doc = %doc_name,
                version = master.msc_version,
                excerpts = master.excerpts.len(),
                "score package loaded"
            ),
            Err(e) => debug!(doc = %doc_name, error = %e, "score package load failed"),
        }

        LoadReport { outcome, settings }
    }

    fn read_excerpts(
        &self,
        master: &mut MasterScore,
        container: &dyn ScoreContainer,
        master_ctx: &ReadContext,
    ) {
        for name in container.excerpt_names() {
            let mut part_score = master.create_excerpt_score(name.clone());

            // Subordinate documents always start from scratch, independent
            // of the master's version.
            DefaultStyleSeeder.seed_default_style(&mut part_score);

            let style_data = container.read_excerpt_style_file(&name);
            if !style_data.is_empty() {
                apply_style(&mut part_score.style, &style_data, &name);
            }

            let mut ctx = master_ctx.for_excerpt(&name);
            let data = container.read_excerpt_file(&name);
            let mut xml = XmlStream::new(&data, &name);

            if let Err(e) = parse_excerpt(&mut part_score, &mut xml, &mut ctx) {
                warn!(excerpt = %name, error = %e, "excerpt parse failed");
            }

            part_score.link_measures(&master.score);

            let mut excerpt = Excerpt::new(part_score);
            excerpt.set_tracks_mapping(ctx.tracks().to_vec());
            excerpt.set_name(name);
            master.add_excerpt(excerpt);
        }
    }
}

/// Parse one excerpt document. Excerpts are always in the modern format,
/// never routed through a legacy strategy.
fn parse_excerpt(
    score: &mut Score,
    xml: &mut XmlStream<'_>,
    ctx: &mut ReadContext,
) -> scorepack_format::Result<()> {
    while xml.read_next_start_element() {
        if xml.name() == ROOT_ELEMENT {
            return read_modern(score, xml, ctx);
        }
        xml.unknown();
    }
    Err(scorepack_format::Error::corrupted(xml.error_text()))
}

fn doc_name_for(master: &MasterScore, container: &dyn ScoreContainer) -> String {
    if !master.name.is_empty() {
        return master.name.clone();
    }
    container
        .file_path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| container.file_path().display().to_string())
}
