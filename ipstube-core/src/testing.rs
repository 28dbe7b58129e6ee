//! Test fixtures: asset builders and recording mocks

use std::collections::HashMap;
use std::string::String;
use std::vec::Vec;

use crate::image::format::BitDepth;
use crate::image::{MemorySource, PixelBuffer};
use crate::traits::{
    AssetStore, DrawSurface, PanelIndex, PanelPower, PanelSelect, Selection, StorageError,
    SurfaceError, TextStyle,
};

/// Build a BMP with `rows` stored bottom row first, each row unpadded
pub fn bmp_bytes(
    bits: u16,
    width: u32,
    height: u32,
    palette: &[u32],
    declared_palette: u32,
    rows: &[&[u8]],
) -> Vec<u8> {
    let depth = BitDepth::try_from(bits).unwrap();
    let stride = depth.row_stride(width) as usize;
    let data_offset = 14 + 40 + 4 * palette.len() as u32;

    let mut out = Vec::new();
    out.extend_from_slice(&0x4D42u16.to_le_bytes());
    out.extend_from_slice(&(data_offset + (stride * rows.len()) as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&data_offset.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bits.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&declared_palette.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for entry in palette {
        out.extend_from_slice(&entry.to_le_bytes());
    }
    for row in rows {
        let mut padded = row.to_vec();
        padded.resize(stride, 0);
        out.extend_from_slice(&padded);
    }
    out
}

/// Build a single-color BMP of the given depth
pub fn solid_bmp(bits: u16, width: u32, height: u32, rgb: u32) -> Vec<u8> {
    let depth = BitDepth::try_from(bits).unwrap();
    let row: Vec<u8> = if bits == 24 {
        (0..width)
            .flat_map(|_| [rgb as u8, (rgb >> 8) as u8, (rgb >> 16) as u8])
            .collect()
    } else {
        // Every pixel is palette index 0
        vec![0; depth.row_data_len(width) as usize]
    };
    let rows: Vec<&[u8]> = (0..height).map(|_| row.as_slice()).collect();
    if bits == 24 {
        bmp_bytes(bits, width, height, &[], 0, &rows)
    } else {
        bmp_bytes(bits, width, height, &[rgb], 1, &rows)
    }
}

/// Build a CLK asset
pub fn clk_bytes(width: u16, height: u16, pixels: &[u16]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0x4B43u16.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    for p in pixels {
        out.extend_from_slice(&p.to_le_bytes());
    }
    out
}

/// In-memory asset store counting opens per path
#[derive(Default)]
pub struct MockStore {
    pub files: HashMap<String, Vec<u8>>,
    pub opens: HashMap<String, usize>,
    pub available: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            available: true,
            ..Default::default()
        }
    }

    pub fn insert(&mut self, path: &str, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }

    pub fn opens_of(&self, path: &str) -> usize {
        self.opens.get(path).copied().unwrap_or(0)
    }

    pub fn total_opens(&self) -> usize {
        self.opens.values().sum()
    }
}

impl AssetStore for MockStore {
    type Source<'s> = MemorySource<'s>;

    fn is_available(&self) -> bool {
        self.available
    }

    fn exists(&mut self, path: &str) -> bool {
        self.available && self.files.contains_key(path)
    }

    fn open(&mut self, path: &str) -> Result<MemorySource<'_>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        *self.opens.entry(path.into()).or_default() += 1;
        self.files
            .get(path)
            .map(|bytes| MemorySource::new(bytes))
            .ok_or(StorageError::NotFound)
    }
}

/// Everything that happened on the bus, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Init,
    Select(u8),
    SelectAll,
    Commit,
    Power(bool),
    FillScreen(u16),
    FillRect { x: u16, y: u16, w: u16, h: u16, color: u16 },
    Text { x: u16, y: u16, text: String, color: u16 },
    /// Buffer transfer, identified by its center pixel
    Push { center: u16 },
}

pub type OpLog = std::rc::Rc<std::cell::RefCell<Vec<Op>>>;

pub fn op_log() -> OpLog {
    OpLog::default()
}

pub struct MockSelect {
    pub log: OpLog,
    pub selection: Selection,
}

impl MockSelect {
    pub fn new(log: &OpLog) -> Self {
        Self {
            log: log.clone(),
            selection: Selection::All,
        }
    }
}

impl PanelSelect for MockSelect {
    fn init(&mut self) {
        self.log.borrow_mut().push(Op::Init);
        self.selection = Selection::All;
    }

    fn select(&mut self, panel: PanelIndex) {
        self.log.borrow_mut().push(Op::Select(panel.get()));
        self.selection = Selection::Panel(panel);
    }

    fn select_all(&mut self) {
        self.log.borrow_mut().push(Op::SelectAll);
        self.selection = Selection::All;
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn commit(&mut self) {
        self.log.borrow_mut().push(Op::Commit);
    }
}

pub struct MockPower {
    pub log: OpLog,
    pub on: bool,
}

impl MockPower {
    pub fn new(log: &OpLog) -> Self {
        Self {
            log: log.clone(),
            on: false,
        }
    }
}

impl PanelPower for MockPower {
    fn set_powered(&mut self, on: bool) {
        self.log.borrow_mut().push(Op::Power(on));
        self.on = on;
    }

    fn is_powered(&self) -> bool {
        self.on
    }
}

pub struct MockSurface {
    pub log: OpLog,
    pub fail: bool,
}

impl MockSurface {
    pub fn new(log: &OpLog) -> Self {
        Self {
            log: log.clone(),
            fail: false,
        }
    }

    fn record(&mut self, op: Op) -> Result<(), SurfaceError> {
        if self.fail {
            return Err(SurfaceError::Communication);
        }
        self.log.borrow_mut().push(op);
        Ok(())
    }
}

impl DrawSurface for MockSurface {
    fn fill_screen(&mut self, color: u16) -> Result<(), SurfaceError> {
        self.record(Op::FillScreen(color))
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16) -> Result<(), SurfaceError> {
        self.record(Op::FillRect { x, y, w, h, color })
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, style: TextStyle) -> Result<(), SurfaceError> {
        self.record(Op::Text {
            x,
            y,
            text: text.into(),
            color: style.color,
        })
    }

    fn push_buffer(&mut self, buffer: &PixelBuffer<'_>) -> Result<(), SurfaceError> {
        let center = buffer
            .get(buffer.width() / 2, buffer.height() / 2)
            .unwrap_or(0);
        self.record(Op::Push { center })
    }
}
