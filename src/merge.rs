/*!
 * The merge pipeline core: applying reference datasets to corpus documents.
 *
 * All call sites share one merge policy, implemented by [`merge_gloss`]:
 * among the dataset rows matching a (surah, verse) key, the row at the
 * lowest dataset position wins, and it is applied whether or not the target
 * slot already holds a gloss. The policy is deterministic for a given
 * dataset and idempotent across reruns.
 *
 * The video merge is idempotent by construction instead: a reference is
 * appended only if no reference with the same video id exists yet.
 */

use serde::{Deserialize, Serialize};

use crate::corpus::{Gharib, GlossEntry, GlossSlot, SurahDocument, VideoRef};
use crate::datasets::{GharibRecord, VideoMapping};

/// Counters accumulated over a batch run. Observational only; they never
/// affect merge behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Documents loaded, merged and (unless dry-run) written back
    pub files_processed: usize,
    /// Documents skipped for structural reasons (missing verses, number mismatch)
    pub files_skipped: usize,
    /// Documents that failed to read, parse or write
    pub files_failed: usize,
    /// Verses that received at least one gloss
    pub verses_touched: usize,
    /// Gloss slots written
    pub glosses_added: usize,
    /// Video references inserted
    pub videos_added: usize,
}

/// Resolve a gloss slot against the candidate entries matching its verse.
///
/// The first candidate wins and replaces whatever the slot held; with no
/// candidates the slot is left alone. Candidate order is dataset order, so
/// the outcome depends only on the dataset, never on prior slot state or on
/// how many times the merge has run.
pub fn merge_gloss(existing: GlossSlot, candidates: &[GlossEntry]) -> GlossSlot {
    match candidates.first() {
        Some(entry) => GlossSlot::Present(entry.clone()),
        None => existing,
    }
}

/// Apply a gharib reference dataset to one document.
///
/// Visits every verse, collects the dataset rows matching
/// `(surah, ayah.number)`, and resolves both slots through [`merge_gloss`].
/// Rows with an empty meaning for a reference contribute no candidate for
/// that slot. Verses with no matching rows are left byte-identical,
/// including verses that never had a `gharib` structure.
pub fn apply_gharib(
    document: &mut SurahDocument,
    surah: u32,
    dataset: &[GharibRecord],
    stats: &mut MergeStats,
) {
    for ayah in document.verses_mut() {
        let matches: Vec<&GharibRecord> = dataset
            .iter()
            .filter(|record| record.surah == surah && record.verse == ayah.number)
            .collect();

        if matches.is_empty() {
            continue;
        }

        let muyassar_candidates: Vec<GlossEntry> = matches
            .iter()
            .filter(|record| !record.muyassar.is_empty())
            .map(|record| GlossEntry {
                word: record.word.clone(),
                meaning: record.muyassar.clone(),
            })
            .collect();

        let siraj_candidates: Vec<GlossEntry> = matches
            .iter()
            .filter(|record| !record.siraj.is_empty())
            .map(|record| GlossEntry {
                word: record.word.clone(),
                meaning: record.siraj.clone(),
            })
            .collect();

        if muyassar_candidates.is_empty() && siraj_candidates.is_empty() {
            continue;
        }

        let gharib = ayah.gharib.take().unwrap_or_default();

        if !muyassar_candidates.is_empty() {
            stats.glosses_added += 1;
        }
        if !siraj_candidates.is_empty() {
            stats.glosses_added += 1;
        }
        stats.verses_touched += 1;

        ayah.gharib = Some(Gharib {
            muyassar: merge_gloss(gharib.muyassar, &muyassar_candidates),
            siraj: merge_gloss(gharib.siraj, &siraj_candidates),
        });
    }
}

/// Apply a companion-video mapping dataset to one document.
///
/// For every mapping matching `(surah, ayah.number)`, a [`VideoRef`] with
/// the canonical watch URL is appended to the verse's video list unless a
/// reference with the same video id is already there. Running this twice
/// with the same dataset yields the same list.
pub fn apply_videos(
    document: &mut SurahDocument,
    surah: u32,
    mappings: &[VideoMapping],
    stats: &mut MergeStats,
) {
    for ayah in document.verses_mut() {
        for mapping in mappings
            .iter()
            .filter(|mapping| mapping.surah == surah && mapping.verse == ayah.number)
        {
            let videos = ayah.shehri_videos.get_or_insert_with(Vec::new);
            if videos.iter().any(|video| video.video_id == mapping.video_id) {
                continue;
            }
            videos.push(VideoRef {
                video_id: mapping.video_id.clone(),
                url: watch_url(&mapping.video_id),
                title: mapping.title.clone(),
                word: mapping.word.clone(),
            });
            stats.videos_added += 1;
        }
    }
}

/// Canonical YouTube watch URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}
