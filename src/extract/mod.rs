use crate::result::{RamboError, Result};
use chrono::{DateTime, FixedOffset};
use nom_exif::{Exif, ExifIter, ExifTag, MediaParser, MediaSource, TrackInfo, TrackInfoTag};
use std::fs::File;
use std::path::PathBuf;

// Tag priority for images. OffsetTimeOriginal carries the timezone-aware
// variant of DateTimeOriginal on cameras that record it.
const EXIF_TAGS_FOR_CREATION_DATETIME: [ExifTag; 3] = [
    ExifTag::DateTimeOriginal,
    ExifTag::OffsetTimeOriginal,
    ExifTag::CreateDate,
];

const TRACK_INFO_TAGS_FOR_CREATION_DATETIME: [TrackInfoTag; 1] = [TrackInfoTag::CreateDate];

pub struct MediaFile {
    pub source: MediaSource<File>,
    pub path: PathBuf,
}

/// We return the iterator which will create (and clean up!) the media
/// sources on-demand when it gets iterated over, i.e. in a for-loop.
/// Returning a vector would open all matched files at once, which could
/// cause a _Too many files open_ error on large runs.
pub fn open_media_files(
    paths: Vec<PathBuf>,
) -> impl Iterator<Item = std::result::Result<MediaFile, (PathBuf, nom_exif::Error)>> {
    paths
        .into_iter()
        .filter(|path| path.is_file())
        .map(|path| {
            MediaSource::file_path(&path)
                .map_err(|error| (path.clone(), error))
                .map(|source| MediaFile { source, path })
        })
}

/** Extracts creation datetimes from media metadata
 *
 * Holds a single [`MediaParser`] which is reused across all files of a
 * run; the parser keeps internal buffers worth recycling.
 *
 * File type detection is content sniffing by the parser, never the file
 * extension. Images are read through their EXIF block, videos through
 * their track metadata.
 */
pub struct DateExtractor {
    parser: MediaParser,
}

impl DateExtractor {
    pub fn new() -> Self {
        Self {
            parser: MediaParser::new(),
        }
    }

    pub fn extract(&mut self, source: MediaSource<File>) -> Result<DateTime<FixedOffset>> {
        if source.has_exif() {
            let exif_iter: ExifIter = self
                .parser
                .parse(source)
                .map_err(|error| RamboError::extract(format!("Failed to parse EXIF data: {}", error)))?;

            let exif: Exif = exif_iter.into();
            Self::from_exif(&exif)
        } else if source.has_track() {
            let track_info: TrackInfo = self.parser.parse(source).map_err(|error| {
                RamboError::extract(format!("Failed to parse track data: {}", error))
            })?;

            Self::from_track_info(&track_info)
        } else {
            Err(RamboError::extract(RamboError::NO_METADATA))
        }
    }

    fn from_exif(exif: &Exif) -> Result<DateTime<FixedOffset>> {
        for exif_tag in EXIF_TAGS_FOR_CREATION_DATETIME {
            if let Some(exif_value) = exif.get(exif_tag) {
                if let Some(datetime) = exif_value.as_time() {
                    return Ok(datetime);
                }
            }
        }

        Err(RamboError::extract(format!(
            "{} from EXIF data",
            RamboError::NO_CREATION_DATETIME
        )))
    }

    fn from_track_info(track_info: &TrackInfo) -> Result<DateTime<FixedOffset>> {
        for track_info_tag in TRACK_INFO_TAGS_FOR_CREATION_DATETIME {
            if let Some(track_value) = track_info.get(track_info_tag) {
                if let Some(datetime) = track_value.as_time() {
                    return Ok(datetime);
                }
            }
        }

        Err(RamboError::extract(format!(
            "{} from track info data",
            RamboError::NO_CREATION_DATETIME
        )))
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}
