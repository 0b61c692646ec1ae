use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crossterm::{cursor::MoveTo, queue, style::Print};
use ratatui::backend::{Backend, ClearType, CrosstermBackend, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Size};

/// Kitty image id used for the detail sprite.
pub const SPRITE_IMAGE_ID: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: u16,
    pub y: u16,
    pub sequence: String,
}

/// The one sprite the UI wants on screen, if any.
#[derive(Default, Debug, Clone)]
pub struct SpriteSlot {
    current: Option<Placement>,
}

impl SpriteSlot {
    pub fn place(&mut self, x: u16, y: u16, sequence: String) {
        self.current = Some(Placement { x, y, sequence });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Placement> {
        self.current.as_ref()
    }
}

pub type SharedSpriteSlot = Arc<Mutex<SpriteSlot>>;

pub fn shared_slot() -> SharedSpriteSlot {
    Arc::new(Mutex::new(SpriteSlot::default()))
}

/// Crossterm backend that writes the slot's kitty sequence after each frame.
#[derive(Debug)]
pub struct SpriteBackend<W: Write> {
    inner: CrosstermBackend<W>,
    slot: SharedSpriteSlot,
    drawn: Option<Placement>,
}

impl<W: Write> SpriteBackend<W> {
    pub fn new(writer: W, slot: SharedSpriteSlot) -> Self {
        Self {
            inner: CrosstermBackend::new(writer),
            slot,
            drawn: None,
        }
    }

    fn wanted(&self) -> io::Result<Option<Placement>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| io::Error::other("sprite slot lock poisoned"))?;
        Ok(slot.current().cloned())
    }
}

impl<W: Write> Backend for SpriteBackend<W> {
    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        self.inner.draw(content)?;
        let wanted = self.wanted()?;
        if wanted == self.drawn {
            return Ok(());
        }
        if self.drawn.is_some() {
            queue!(
                self.inner,
                Print(format!("\x1b_Ga=d,d=i,i={SPRITE_IMAGE_ID}\x1b\\"))
            )?;
        }
        if let Some(placement) = &wanted {
            queue!(
                self.inner,
                MoveTo(placement.x, placement.y),
                Print(&placement.sequence)
            )?;
        }
        self.drawn = wanted;
        Ok(())
    }

    fn append_lines(&mut self, n: u16) -> io::Result<()> {
        self.inner.append_lines(n)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.inner.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.inner.show_cursor()
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        self.inner.get_cursor_position()
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        self.inner.set_cursor_position(position)
    }

    fn clear(&mut self) -> io::Result<()> {
        // a full clear wipes placed images too
        self.drawn = None;
        self.inner.clear()
    }

    fn clear_region(&mut self, clear_type: ClearType) -> io::Result<()> {
        self.inner.clear_region(clear_type)
    }

    fn size(&self) -> io::Result<Size> {
        self.inner.size()
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        self.inner.window_size()
    }

    fn flush(&mut self) -> io::Result<()> {
        Backend::flush(&mut self.inner)
    }
}

impl<W: Write> Write for SpriteBackend<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(&mut self.inner)
    }
}
