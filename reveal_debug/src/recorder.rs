// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Counts are stored as `u32`; floating-point fields keep their exact bits.

use reveal_core::geometry::ViewportState;
use reveal_core::trace::{
    ClassifiedEvent, PassBeginEvent, PassEndEvent, RevealEvent, RevealGroup, SectionToggleEvent,
    TraceSink, Trigger,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_CLASSIFIED: u8 = 1;
const TAG_PASS_BEGIN: u8 = 2;
const TAG_REVEAL: u8 = 3;
const TAG_PASS_END: u8 = 4;
const TAG_SECTION_TOGGLE: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_count(&mut self, v: usize) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "counts capped at u32::MAX for recording"
        )]
        self.write_u32(v.min(u32::MAX as usize) as u32);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_trigger(&mut self, t: Trigger) {
        self.write_u8(match t {
            Trigger::Startup => 0,
            Trigger::Scroll => 1,
            Trigger::Resize => 2,
            Trigger::Manual => 3,
        });
    }

    fn write_group(&mut self, g: RevealGroup) {
        self.write_u8(match g {
            RevealGroup::Fade => 0,
            RevealGroup::Slide => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_classified(&mut self, e: &ClassifiedEvent) {
        self.write_u8(TAG_CLASSIFIED);
        self.write_f64(e.timestamp_ms);
        self.write_count(e.fade);
        self.write_count(e.normal);
        self.write_count(e.fast);
    }

    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.write_u8(TAG_PASS_BEGIN);
        self.write_u64(e.pass_index);
        self.write_trigger(e.trigger);
        self.write_f64(e.viewport.height);
        self.write_bool(e.viewport.narrow);
        self.write_f64(e.timestamp_ms);
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.write_u8(TAG_REVEAL);
        self.write_u64(e.pass_index);
        self.write_group(e.group);
        self.write_count(e.position);
        self.write_f64(e.top);
        self.write_f64(e.line);
        self.write_f64(e.delay);
        self.write_f64(e.duration);
        self.write_bool(e.chained);
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        self.write_u8(TAG_PASS_END);
        self.write_u64(e.pass_index);
        self.write_count(e.fade_revealed);
        self.write_count(e.slide_revealed);
        self.write_count(e.skipped);
        self.write_f64(e.timestamp_ms);
    }

    fn on_section_toggle(&mut self, e: &SectionToggleEvent) {
        self.write_u8(TAG_SECTION_TOGGLE);
        self.write_bool(e.entered);
        self.write_f64(e.timestamp_ms);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A [`ClassifiedEvent`].
    Classified(ClassifiedEvent),
    /// A [`PassBeginEvent`].
    PassBegin(PassBeginEvent),
    /// A [`RevealEvent`].
    Reveal(RevealEvent),
    /// A [`PassEndEvent`].
    PassEnd(PassEndEvent),
    /// A [`SectionToggleEvent`].
    SectionToggle(SectionToggleEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.read_array::<1>().map(|[b]| b)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_count(&mut self) -> Option<usize> {
        self.read_array()
            .map(u32::from_le_bytes)
            .and_then(|v| usize::try_from(v).ok())
    }

    fn read_bool(&mut self) -> Option<bool> {
        self.read_u8().map(|v| v != 0)
    }

    fn read_trigger(&mut self) -> Option<Trigger> {
        Some(match self.read_u8()? {
            0 => Trigger::Startup,
            1 => Trigger::Scroll,
            2 => Trigger::Resize,
            _ => Trigger::Manual,
        })
    }

    fn read_group(&mut self) -> Option<RevealGroup> {
        Some(match self.read_u8()? {
            0 => RevealGroup::Fade,
            _ => RevealGroup::Slide,
        })
    }

    fn decode_classified(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Classified(ClassifiedEvent {
            timestamp_ms: self.read_f64()?,
            fade: self.read_count()?,
            normal: self.read_count()?,
            fast: self.read_count()?,
        }))
    }

    fn decode_pass_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassBegin(PassBeginEvent {
            pass_index: self.read_u64()?,
            trigger: self.read_trigger()?,
            viewport: ViewportState {
                height: self.read_f64()?,
                narrow: self.read_bool()?,
            },
            timestamp_ms: self.read_f64()?,
        }))
    }

    fn decode_reveal(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Reveal(RevealEvent {
            pass_index: self.read_u64()?,
            group: self.read_group()?,
            position: self.read_count()?,
            top: self.read_f64()?,
            line: self.read_f64()?,
            delay: self.read_f64()?,
            duration: self.read_f64()?,
            chained: self.read_bool()?,
        }))
    }

    fn decode_pass_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassEnd(PassEndEvent {
            pass_index: self.read_u64()?,
            fade_revealed: self.read_count()?,
            slide_revealed: self.read_count()?,
            skipped: self.read_count()?,
            timestamp_ms: self.read_f64()?,
        }))
    }

    fn decode_section_toggle(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SectionToggle(SectionToggleEvent {
            entered: self.read_bool()?,
            timestamp_ms: self.read_f64()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_CLASSIFIED => self.decode_classified(),
            TAG_PASS_BEGIN => self.decode_pass_begin(),
            TAG_REVEAL => self.decode_reveal(),
            TAG_PASS_END => self.decode_pass_end(),
            TAG_SECTION_TOGGLE => self.decode_section_toggle(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reveal() -> RevealEvent {
        RevealEvent {
            pass_index: 3,
            group: RevealGroup::Slide,
            position: 4,
            top: 912.5,
            line: 950.0,
            delay: 0.58,
            duration: 0.15,
            chained: true,
        }
    }

    #[test]
    fn records_a_full_pass_in_order() {
        let mut rec = RecorderSink::new();
        rec.on_classified(&ClassifiedEvent {
            timestamp_ms: 12.0,
            fade: 2,
            normal: 5,
            fast: 1,
        });
        rec.on_pass_begin(&PassBeginEvent {
            pass_index: 3,
            trigger: Trigger::Resize,
            viewport: ViewportState {
                height: 1000.0,
                narrow: true,
            },
            timestamp_ms: 20.0,
        });
        rec.on_reveal(&sample_reveal());
        rec.on_pass_end(&PassEndEvent {
            pass_index: 3,
            fade_revealed: 0,
            slide_revealed: 1,
            skipped: 2,
            timestamp_ms: 21.5,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], RecordedEvent::Classified(e) if e.normal == 5));
        match &events[1] {
            RecordedEvent::PassBegin(e) => {
                assert_eq!(e.trigger, Trigger::Resize);
                assert!(e.viewport.narrow);
            }
            other => panic!("expected PassBegin, got {other:?}"),
        }
        match &events[2] {
            RecordedEvent::Reveal(e) => {
                let orig = sample_reveal();
                assert_eq!(e.group, orig.group);
                assert_eq!(e.position, orig.position);
                assert_eq!(e.delay.to_bits(), orig.delay.to_bits());
                assert!(e.chained);
            }
            other => panic!("expected Reveal, got {other:?}"),
        }
        assert!(matches!(events[3], RecordedEvent::PassEnd(e) if e.skipped == 2));
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_section_toggle(&SectionToggleEvent {
            entered: true,
            timestamp_ms: 4.0,
        });
        rec.on_reveal(&sample_reveal());
        let bytes = rec.into_bytes();

        let events: Vec<_> = decode(&bytes[..bytes.len() - 3]).collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            RecordedEvent::SectionToggle(SectionToggleEvent { entered: true, .. })
        ));
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }
}
