//! The fixed scenario sequence of the conformance suite
//!
//! Every scenario is idempotent and self-contained: it provisions whatever
//! fixture state it needs and asserts one slice of the contract. The harness
//! empties the backing store before each scenario, so listings and counts can
//! be exact.

use crate::adapter::{Visibility, WriteOptions};
use crate::error::{SuiteError, SuiteResult};
use crate::suite::check::{
    check, check_bytes_equal, check_eq, expect_unsupported, require_found,
};
use crate::suite::harness::ScenarioContext;
use bytes::Bytes;
use chrono::Utc;
use std::io::{Cursor, Read};

/// One named conformance scenario
pub struct Scenario {
    /// Scenario name, stable across runs
    pub name: &'static str,
    /// The scenario body
    pub run: fn(&ScenarioContext<'_>) -> SuiteResult<()>,
}

/// The fixed scenario sequence, in execution order
pub fn all() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "writing_and_reading_a_file_with_special_characters",
            run: writing_and_reading_a_file_with_special_characters,
        },
        Scenario {
            name: "writing_a_file_with_empty_contents",
            run: writing_a_file_with_empty_contents,
        },
        Scenario {
            name: "writing_and_reading_a_stream",
            run: writing_and_reading_a_stream,
        },
        Scenario {
            name: "writing_an_empty_stream",
            run: writing_an_empty_stream,
        },
        Scenario {
            name: "overwriting_a_file",
            run: overwriting_a_file,
        },
        Scenario {
            name: "checking_file_existence",
            run: checking_file_existence,
        },
        Scenario {
            name: "checking_directory_existence",
            run: checking_directory_existence,
        },
        Scenario {
            name: "deleting_a_file",
            run: deleting_a_file,
        },
        Scenario {
            name: "deleting_a_missing_file_is_a_noop",
            run: deleting_a_missing_file_is_a_noop,
        },
        Scenario {
            name: "deleting_a_directory_recursively",
            run: deleting_a_directory_recursively,
        },
        Scenario {
            name: "creating_a_directory_idempotently",
            run: creating_a_directory_idempotently,
        },
        Scenario {
            name: "moving_a_file",
            run: moving_a_file,
        },
        Scenario {
            name: "moving_a_missing_file",
            run: moving_a_missing_file,
        },
        Scenario {
            name: "copying_a_file",
            run: copying_a_file,
        },
        Scenario {
            name: "copying_onto_an_existing_file",
            run: copying_onto_an_existing_file,
        },
        Scenario {
            name: "copying_a_missing_file",
            run: copying_a_missing_file,
        },
        Scenario {
            name: "listing_contents_shallow",
            run: listing_contents_shallow,
        },
        Scenario {
            name: "listing_contents_recursively",
            run: listing_contents_recursively,
        },
        Scenario {
            name: "listing_a_missing_directory",
            run: listing_a_missing_directory,
        },
        Scenario {
            name: "fetching_file_size",
            run: fetching_file_size,
        },
        Scenario {
            name: "fetching_last_modified",
            run: fetching_last_modified,
        },
        Scenario {
            name: "detecting_svg_mimetype",
            run: detecting_svg_mimetype,
        },
        Scenario {
            name: "unknown_mimetype_is_undetermined",
            run: unknown_mimetype_is_undetermined,
        },
        Scenario {
            name: "missing_path_reports_absence_consistently",
            run: missing_path_reports_absence_consistently,
        },
        Scenario {
            name: "setting_and_fetching_visibility",
            run: setting_and_fetching_visibility,
        },
        Scenario {
            name: "fetching_visibility_of_a_missing_path",
            run: fetching_visibility_of_a_missing_path,
        },
        Scenario {
            name: "reading_a_stream_releases_cleanly",
            run: reading_a_stream_releases_cleanly,
        },
    ]
}

fn writing_and_reading_a_file_with_special_characters(
    ctx: &ScenarioContext<'_>,
) -> SuiteResult<()> {
    // Brackets, braces and spaces are ordinary bytes, never pattern syntax
    for path in ["some/file[name].txt", "spaced dir/{braced} name.txt"] {
        ctx.adapter
            .write(path, Bytes::from("contents"), &WriteOptions::default())?;

        let contents = require_found(ctx.adapter.read(path)?, "read of special-character path")?;
        check_bytes_equal(&contents, b"contents", "special-character path round-trip")?;
        check(ctx.adapter.has(path)?, "written path must exist")?;
    }
    Ok(())
}

fn writing_a_file_with_empty_contents(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "empty.txt";
    ctx.adapter
        .write(path, Bytes::new(), &WriteOptions::default())?;

    let contents = require_found(ctx.adapter.read(path)?, "read of empty file")?;
    check(contents.is_empty(), "empty write must read back empty")?;
    check_eq(ctx.adapter.size_of(path)?, Some(0), "size of empty file")
}

fn writing_and_reading_a_stream(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "streamed/image.svg";
    let payload = ctx.fixtures.svg().clone();

    let mut source = Cursor::new(payload.to_vec());
    ctx.adapter
        .write_stream(path, &mut source, &WriteOptions::default())?;

    let contents = require_found(ctx.adapter.read(path)?, "read of streamed file")?;
    check_bytes_equal(&contents, &payload, "streamed write round-trip")?;

    let mut stream = require_found(ctx.adapter.read_stream(path)?, "stream over streamed file")?;
    let mut drained = Vec::new();
    stream
        .read_to_end(&mut drained)
        .map_err(|e| SuiteError::CheckFailed {
            reason: format!("returned stream was not consumable: {}", e),
        })?;
    check_bytes_equal(&drained, &payload, "streamed read round-trip")
}

fn writing_an_empty_stream(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "streamed/empty.txt";
    let mut source = Cursor::new(Vec::new());
    ctx.adapter
        .write_stream(path, &mut source, &WriteOptions::default())?;

    check_eq(
        ctx.adapter.size_of(path)?,
        Some(0),
        "an empty stream produces a zero-length file",
    )
}

fn overwriting_a_file(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "rewritten.txt";
    ctx.provision(path, &Bytes::from("first"), &WriteOptions::default())?;
    ctx.adapter
        .write(path, Bytes::from("second"), &WriteOptions::default())?;

    let contents = require_found(ctx.adapter.read(path)?, "read of overwritten file")?;
    check_bytes_equal(&contents, b"second", "overwrite must replace contents")
}

fn checking_file_existence(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "exists.txt";
    check(!ctx.adapter.has(path)?, "unwritten path must not exist")?;

    ctx.adapter
        .write(path, Bytes::from("x"), &WriteOptions::default())?;
    check(ctx.adapter.has(path)?, "written path must exist")
}

fn checking_directory_existence(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "some/dir";
    check(!ctx.adapter.has(path)?, "uncreated directory must not exist")?;

    ctx.adapter.create_dir(path, &WriteOptions::default())?;
    check(ctx.adapter.has(path)?, "created directory must exist")
}

fn deleting_a_file(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "doomed.txt";
    ctx.provision(path, &Bytes::from("x"), &WriteOptions::default())?;

    ctx.adapter.delete(path)?;
    check(!ctx.adapter.has(path)?, "deleted file must not exist")?;
    check_eq(
        ctx.adapter.read(path)?,
        None,
        "deleted file must read as not found",
    )
}

fn deleting_a_missing_file_is_a_noop(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "never/written.txt";
    ctx.adapter.delete(path)?;
    check(!ctx.adapter.has(path)?, "missing path stays missing")
}

fn deleting_a_directory_recursively(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    ctx.provision("dir/a.txt", &Bytes::from("a"), &WriteOptions::default())?;
    ctx.provision("dir/sub/b.txt", &Bytes::from("b"), &WriteOptions::default())?;
    ctx.provision("survivor.txt", &Bytes::from("c"), &WriteOptions::default())?;

    ctx.adapter.delete_dir("dir")?;
    check(!ctx.adapter.has("dir")?, "deleted directory must not exist")?;
    check(
        !ctx.adapter.has("dir/a.txt")?,
        "files inside a deleted directory must not exist",
    )?;
    check(
        !ctx.adapter.has("dir/sub/b.txt")?,
        "nested files inside a deleted directory must not exist",
    )?;
    check(
        ctx.adapter.has("survivor.txt")?,
        "entries outside the deleted directory must survive",
    )?;

    // A second deletion of the same directory is a no-op
    ctx.adapter.delete_dir("dir")?;
    Ok(())
}

fn creating_a_directory_idempotently(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "outer/dir";
    ctx.adapter.create_dir(path, &WriteOptions::default())?;
    ctx.adapter.create_dir(path, &WriteOptions::default())?;

    let listing = ctx.adapter.list_contents("outer", false)?;
    check_eq(
        listing.len(),
        1,
        "repeated directory creation must not duplicate listing entries",
    )?;
    check_eq(listing[0].path.as_str(), path, "listed directory path")?;
    check(listing[0].is_dir(), "listed entry must be a directory")
}

fn moving_a_file(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let payload = Bytes::from("moved payload");
    ctx.provision("move/source.txt", &payload, &WriteOptions::default())?;

    let moved = ctx.adapter.rename("move/source.txt", "move/target.txt")?;
    check(moved, "rename of an existing source must report success")?;
    check(
        !ctx.adapter.has("move/source.txt")?,
        "source must not exist after a move",
    )?;

    let contents = require_found(ctx.adapter.read("move/target.txt")?, "read of moved file")?;
    check_bytes_equal(&contents, &payload, "move must carry contents unchanged")
}

fn moving_a_missing_file(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let moved = ctx.adapter.rename("ghost.txt", "still-ghost.txt")?;
    check(!moved, "rename of a missing source must report failure")?;
    check(
        !ctx.adapter.has("still-ghost.txt")?,
        "a failed move must not create the destination",
    )
}

fn copying_a_file(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let payload = Bytes::from("copied payload");
    let supports_visibility = ctx.adapter.capabilities().visibility;
    let options = if supports_visibility {
        WriteOptions::new().with_visibility(Visibility::Private)
    } else {
        WriteOptions::default()
    };
    ctx.provision("copy/source.txt", &payload, &options)?;

    let copied = ctx.adapter.copy("copy/source.txt", "copy/target.txt")?;
    check(copied, "copy of an existing source must report success")?;
    check(
        ctx.adapter.has("copy/source.txt")?,
        "source must survive a copy",
    )?;

    let contents = require_found(ctx.adapter.read("copy/target.txt")?, "read of copied file")?;
    check_bytes_equal(&contents, &payload, "copy must duplicate contents")?;

    if supports_visibility {
        check_eq(
            ctx.adapter.visibility_of("copy/target.txt")?,
            Some(Visibility::Private),
            "copy must carry visibility",
        )?;
    }
    Ok(())
}

fn copying_onto_an_existing_file(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    ctx.provision("collision/a.txt", &Bytes::from("from a"), &WriteOptions::default())?;
    ctx.provision("collision/b.txt", &Bytes::from("from b"), &WriteOptions::default())?;

    let copied = ctx.adapter.copy("collision/a.txt", "collision/b.txt")?;
    check(copied, "copy onto an existing destination must report success")?;

    let contents = require_found(
        ctx.adapter.read("collision/b.txt")?,
        "read of overwritten destination",
    )?;
    check_bytes_equal(&contents, b"from a", "collision policy is last write wins")
}

fn copying_a_missing_file(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let copied = ctx.adapter.copy("ghost.txt", "copy-of-ghost.txt")?;
    check(!copied, "copy of a missing source must report failure")?;
    check(
        !ctx.adapter.has("copy-of-ghost.txt")?,
        "a failed copy must not create the destination",
    )
}

fn listing_contents_shallow(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    ctx.provision("top.txt", &Bytes::from("1"), &WriteOptions::default())?;
    ctx.provision("dir/nested.txt", &Bytes::from("2"), &WriteOptions::default())?;

    let listing = ctx.adapter.list_contents("", false)?;
    check_eq(listing.len(), 2, "shallow root listing entry count")?;

    let files = listing.iter().filter(|e| e.is_file()).count();
    let dirs = listing.iter().filter(|e| e.is_dir()).count();
    check_eq(files, 1, "shallow listing file count")?;
    check_eq(dirs, 1, "shallow listing directory count")?;
    check(
        listing.iter().any(|e| e.path == "top.txt"),
        "shallow listing must contain the top-level file",
    )?;
    check(
        listing.iter().any(|e| e.path == "dir"),
        "shallow listing must contain the subdirectory, not its contents",
    )
}

fn listing_contents_recursively(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    ctx.provision("top.txt", &Bytes::from("1"), &WriteOptions::default())?;
    ctx.provision("dir/nested.txt", &Bytes::from("2"), &WriteOptions::default())?;

    let listing = ctx.adapter.list_contents("", true)?;
    check_eq(listing.len(), 2, "recursive root listing entry count")?;
    check(
        listing.iter().all(|e| e.is_file()),
        "recursive listings enumerate files only",
    )?;
    check(
        listing.iter().any(|e| e.path == "dir/nested.txt"),
        "recursive listing must reach nested files",
    )
}

fn listing_a_missing_directory(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let listing = ctx.adapter.list_contents("never/created", false)?;
    check(listing.is_empty(), "a missing directory lists as empty")
}

fn fetching_file_size(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let payload = Bytes::from("sized payload");
    ctx.provision("sized.txt", &payload, &WriteOptions::default())?;
    ctx.provision_dir("sized-dir")?;

    check_eq(
        ctx.adapter.size_of("sized.txt")?,
        Some(payload.len() as u64),
        "size of a written file",
    )?;
    check_eq(
        ctx.adapter.size_of("missing.txt")?,
        None,
        "size of a missing path is the sentinel",
    )?;
    check_eq(
        ctx.adapter.size_of("sized-dir")?,
        None,
        "size of a directory is undefined",
    )
}

fn fetching_last_modified(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "stamped.txt";
    ctx.adapter
        .write(path, Bytes::from("x"), &WriteOptions::default())?;

    let timestamp = require_found(ctx.adapter.timestamp_of(path)?, "timestamp of written file")?;
    let drift = (Utc::now() - timestamp).num_seconds().abs();
    check(
        drift <= 3600,
        format!("last-modified drifted {}s from the harness clock", drift),
    )
}

fn detecting_svg_mimetype(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "fixture/sample.svg";
    ctx.provision(path, ctx.fixtures.svg(), &WriteOptions::default())?;

    let mimetype = require_found(ctx.adapter.mimetype_of(path)?, "mimetype of the SVG fixture")?;
    check_eq(
        mimetype.as_str(),
        "image/svg+xml",
        "mimetype of the SVG fixture",
    )
}

fn unknown_mimetype_is_undetermined(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "fixture/unknown-content.bin";
    ctx.provision(path, ctx.fixtures.unknown_content(), &WriteOptions::default())?;

    check_eq(
        ctx.adapter.mimetype_of(path)?,
        None,
        "undetermined mimetype is the sentinel, never a guess",
    )
}

fn missing_path_reports_absence_consistently(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    for path in ["never/written.txt", "short-lived.txt"] {
        // Second iteration checks a written-then-deleted path
        if path == "short-lived.txt" {
            ctx.provision(path, &Bytes::from("x"), &WriteOptions::default())?;
            ctx.adapter.delete(path)?;
        }

        check(!ctx.adapter.has(path)?, "absent path: has")?;
        check_eq(ctx.adapter.read(path)?, None, "absent path: read")?;
        check(
            ctx.adapter.read_stream(path)?.is_none(),
            "absent path: read_stream",
        )?;
        check_eq(ctx.adapter.size_of(path)?, None, "absent path: size_of")?;
        check_eq(
            ctx.adapter.timestamp_of(path)?,
            None,
            "absent path: timestamp_of",
        )?;
        check_eq(
            ctx.adapter.mimetype_of(path)?,
            None,
            "absent path: mimetype_of",
        )?;
        if ctx.adapter.capabilities().visibility {
            check_eq(
                ctx.adapter.visibility_of(path)?,
                None,
                "absent path: visibility_of",
            )?;
        }
    }
    Ok(())
}

fn setting_and_fetching_visibility(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "visibility/file.txt";

    if ctx.adapter.capabilities().visibility {
        ctx.adapter.write(
            path,
            Bytes::from("x"),
            &WriteOptions::new().with_visibility(Visibility::Private),
        )?;
        check_eq(
            ctx.adapter.visibility_of(path)?,
            Some(Visibility::Private),
            "visibility requested at write time",
        )?;

        let updated = require_found(
            ctx.adapter.set_visibility(path, Visibility::Public)?,
            "set_visibility confirmation",
        )?;
        check_eq(
            updated.visibility,
            Some(Visibility::Public),
            "confirmation metadata visibility",
        )?;
        check_eq(
            ctx.adapter.visibility_of(path)?,
            Some(Visibility::Public),
            "visibility after mutation",
        )?;
        check_eq(
            ctx.adapter.set_visibility("ghost.txt", Visibility::Public)?,
            None,
            "set_visibility on a missing path is the sentinel",
        )
    } else {
        ctx.provision(path, &Bytes::from("x"), &WriteOptions::default())?;
        expect_unsupported(ctx.adapter.visibility_of(path), "visibility_of")?;
        expect_unsupported(
            ctx.adapter.set_visibility(path, Visibility::Public),
            "set_visibility",
        )
    }
}

fn fetching_visibility_of_a_missing_path(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    // Supporting adapters return the sentinel; non-supporting adapters raise
    // the unsupported-capability fault. Never both.
    let path = "missing/visibility.txt";
    if ctx.adapter.capabilities().visibility {
        check_eq(
            ctx.adapter.visibility_of(path)?,
            None,
            "visibility of a missing path is the sentinel",
        )
    } else {
        expect_unsupported(ctx.adapter.visibility_of(path), "visibility_of")
    }
}

fn reading_a_stream_releases_cleanly(ctx: &ScenarioContext<'_>) -> SuiteResult<()> {
    let path = "stream/release.txt";
    let payload = Bytes::from("scoped resource");
    ctx.provision(path, &payload, &WriteOptions::default())?;

    {
        let mut stream = require_found(ctx.adapter.read_stream(path)?, "first stream")?;
        let mut drained = Vec::new();
        stream
            .read_to_end(&mut drained)
            .map_err(|e| SuiteError::CheckFailed {
                reason: format!("stream was not consumable: {}", e),
            })?;
        check_bytes_equal(&drained, &payload, "stream contents")?;
    }

    // The entry stays readable after the stream is released
    let mut reopened = require_found(ctx.adapter.read_stream(path)?, "second stream")?;
    let mut drained = Vec::new();
    reopened
        .read_to_end(&mut drained)
        .map_err(|e| SuiteError::CheckFailed {
            reason: format!("reopened stream was not consumable: {}", e),
        })?;
    check_bytes_equal(&drained, &payload, "reopened stream contents")?;

    check(
        ctx.adapter.read_stream("stream/missing.txt")?.is_none(),
        "stream over a missing path is the sentinel",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_names_are_unique() {
        let scenarios = all();
        let mut names: Vec<&str> = scenarios.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn test_sequence_is_stable() {
        let first = all();
        let second = all();
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.name, b.name);
        }
        assert_eq!(first.len(), second.len());
    }
}
