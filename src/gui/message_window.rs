//! Message Window
//!
//! Shows queued messages one page at a time with a face portrait beside the
//! text. The window owns a face placement policy and asks it where the face and
//! text go every time a page or line starts and every time it renders, so a
//! side change mid-message takes effect immediately.
//!
//! Inline face escape codes (`\SFL`, `\SFR`, `\SFT`) and host face commands
//! both end in [`MessageWindow::redraw`], which throws away the text already on
//! the page and continues typing on a fresh one.
//!
//! # Example
//!
//! ```rust
//! let mut window = MessageWindow::new(policy, layout, MessageConfig::default(), 624);
//! window.push(Message::with_face("Actor1", 0, "Hello!\\SFR Over here now."));
//!
//! // Each frame
//! window.update();
//! window.render(&mut surface)?;
//!
//! // On confirm key
//! window.advance();
//! ```

use super::surface::{WindowStyle, WindowSurface};
use crate::config::MessageConfig;
use crate::face::{
    EscapeCode, FaceCommand, FaceImageRef, FacePlacement, FacePlacementPolicy, FaceSheetLayout,
};
use crate::text::{GLYPH_ADVANCE, GLYPH_HEIGHT};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use std::collections::VecDeque;

/// A message to show: optional face plus text with escape codes
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub face: Option<FaceImageRef>,
    pub text: String,
}

impl Message {
    /// Message without a face
    pub fn new(text: impl Into<String>) -> Self {
        Message {
            face: None,
            text: text.into(),
        }
    }

    /// Message with face `index` of sheet `face_name`; an empty name means no face
    pub fn with_face(face_name: &str, index: u32, text: impl Into<String>) -> Self {
        let face = (!face_name.is_empty()).then(|| FaceImageRef::new(face_name, index));
        Message {
            face,
            text: text.into(),
        }
    }
}

/// A run of text on the current page, in contents coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PageLine {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageState {
    /// Nothing to show
    Closed,
    /// Text is still being typed onto the page
    Typing,
    /// Page is full and more text remains
    WaitingForPage,
    /// All text shown, waiting for input to close
    WaitingToClose,
}

#[derive(Debug, Clone, PartialEq)]
enum TextToken {
    Char(char),
    NewLine,
    Escape(String),
}

/// Splits message text into characters, line breaks and escape codes
///
/// Escape codes are a backslash followed by letters (case-folded to upper) and
/// an optional `[param]`, or by one of the symbol codes. `\\` is a literal
/// backslash.
fn tokenize(text: &str) -> Vec<TextToken> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' => tokens.push(TextToken::NewLine),
            '\r' => {}
            '\\' => match chars.peek().copied() {
                Some('\\') => {
                    chars.next();
                    tokens.push(TextToken::Char('\\'));
                }
                Some(next) if next.is_ascii_alphabetic() => {
                    let mut code = String::new();
                    while let Some(letter) = chars.peek().copied() {
                        if !letter.is_ascii_alphabetic() {
                            break;
                        }
                        code.push(letter.to_ascii_uppercase());
                        chars.next();
                    }
                    if chars.peek() == Some(&'[') {
                        for param_char in chars.by_ref() {
                            if param_char == ']' {
                                break;
                            }
                        }
                    }
                    tokens.push(TextToken::Escape(code));
                }
                Some(symbol) if "$.|^!<>{}".contains(symbol) => {
                    chars.next();
                    tokens.push(TextToken::Escape(symbol.to_string()));
                }
                _ => tokens.push(TextToken::Char('\\')),
            },
            other => tokens.push(TextToken::Char(other)),
        }
    }

    tokens
}

/// Line geometry derived from the policy at the moment it's needed
struct LineMetrics {
    start_x: i32,
    wrap_width: i32,
    line_height: i32,
    contents_height: i32,
    char_width: i32,
}

/// The message currently on screen
struct ActiveMessage {
    face: Option<FaceImageRef>,
    tokens: Vec<TextToken>,
    cursor: usize,
    lines: Vec<PageLine>,
    x: i32,
    y: i32,
    word_start: bool,
    page_full: bool,
}

impl ActiveMessage {
    fn new(message: Message) -> Self {
        ActiveMessage {
            face: message.face,
            tokens: tokenize(&message.text),
            cursor: 0,
            lines: Vec::new(),
            x: 0,
            y: 0,
            word_start: true,
            page_full: false,
        }
    }

    fn state(&self) -> MessageState {
        let remaining = self.cursor < self.tokens.len();
        match (remaining, self.page_full) {
            (true, false) => MessageState::Typing,
            (true, true) => MessageState::WaitingForPage,
            (false, _) => MessageState::WaitingToClose,
        }
    }

    fn new_page(&mut self, metrics: &LineMetrics) {
        self.lines.clear();
        self.x = metrics.start_x;
        self.y = 0;
        self.word_start = true;
        self.page_full = false;
    }

    fn new_line(&mut self, metrics: &LineMetrics) {
        self.x = metrics.start_x;
        self.y += metrics.line_height;
        self.word_start = true;
        if self.y + metrics.line_height > metrics.contents_height {
            self.page_full = true;
        }
    }

    /// Width of the word starting at the cursor
    fn word_width(&self, metrics: &LineMetrics) -> i32 {
        let letters = self.tokens[self.cursor..]
            .iter()
            .take_while(|t| matches!(t, TextToken::Char(c) if *c != ' '))
            .count();
        letters as i32 * metrics.char_width
    }

    /// Places `c` at the cursor, wrapping first if its word doesn't fit.
    /// Returns false when wrapping filled the page and `c` must wait.
    fn put_char(&mut self, c: char, metrics: &LineMetrics) -> bool {
        if c != ' ' && self.word_start && self.x > metrics.start_x {
            let word_width = self.word_width(metrics);
            if self.x + word_width > metrics.wrap_width {
                self.new_line(metrics);
                if self.page_full {
                    return false;
                }
            }
        }

        let extends_last = match self.lines.last() {
            Some(last) => {
                last.y == self.y
                    && last.x + last.text.chars().count() as i32 * metrics.char_width == self.x
            }
            None => false,
        };
        match self.lines.last_mut() {
            Some(last) if extends_last => last.text.push(c),
            _ => self.lines.push(PageLine {
                x: self.x,
                y: self.y,
                text: c.to_string(),
            }),
        }

        self.x += metrics.char_width;
        self.word_start = c == ' ';
        true
    }
}

/// Bottom-of-screen message window with a face portrait
pub struct MessageWindow<P: FacePlacement = FacePlacementPolicy> {
    policy: P,
    layout: FaceSheetLayout,
    config: MessageConfig,
    style: WindowStyle,
    text_color: Color,
    x: i32,
    y: i32,
    queue: VecDeque<Message>,
    active: Option<ActiveMessage>,
}

impl<P: FacePlacement> MessageWindow<P> {
    /// Creates a window anchored to the bottom of a `screen_height` tall screen
    pub fn new(policy: P, layout: FaceSheetLayout, config: MessageConfig, screen_height: u32) -> Self {
        let y = screen_height.saturating_sub(config.height) as i32;
        MessageWindow {
            policy,
            layout,
            config,
            style: WindowStyle::default(),
            text_color: Color::RGB(255, 255, 255),
            x: 0,
            y,
            queue: VecDeque::new(),
            active: None,
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Queues a message; it opens right away if the window is idle
    pub fn push(&mut self, message: Message) {
        self.queue.push_back(message);
        if self.active.is_none() {
            self.start_next();
        }
    }

    pub fn state(&self) -> MessageState {
        self.active
            .as_ref()
            .map_or(MessageState::Closed, |a| a.state())
    }

    /// True while a message is open or queued
    pub fn is_busy(&self) -> bool {
        self.active.is_some() || !self.queue.is_empty()
    }

    /// Text currently on the page
    pub fn page_lines(&self) -> &[PageLine] {
        match &self.active {
            Some(active) => active.lines.as_slice(),
            None => &[],
        }
    }

    pub fn contents_width(&self) -> u32 {
        self.config.width.saturating_sub(self.config.padding * 2)
    }

    fn contents_height(&self) -> u32 {
        self.config.height.saturating_sub(self.config.padding * 2)
    }

    fn metrics(&self, face: Option<&FaceImageRef>) -> LineMetrics {
        LineMetrics {
            start_x: self.policy.text_start_x(face),
            wrap_width: self
                .policy
                .wordwrap_width(self.contents_width(), self.layout.face_width)
                as i32,
            line_height: self.config.line_height as i32,
            contents_height: self.contents_height() as i32,
            char_width: (GLYPH_ADVANCE * self.config.text_scale) as i32,
        }
    }

    fn start_next(&mut self) {
        self.active = self.queue.pop_front().map(ActiveMessage::new);
        self.redraw();
    }

    /// Types the next `chars_per_tick` tokens
    pub fn update(&mut self) {
        for _ in 0..self.config.chars_per_tick.max(1) {
            if !self.step() {
                break;
            }
        }
    }

    /// Confirm input: finish the page, turn the page, or close the message
    pub fn advance(&mut self) {
        match self.state() {
            MessageState::Closed => self.start_next(),
            MessageState::Typing => while self.step() {},
            MessageState::WaitingForPage => self.redraw(),
            MessageState::WaitingToClose => {
                self.active = None;
                self.start_next();
            }
        }
    }

    /// Applies a host face command and redraws the open message
    pub fn handle_face_command(&mut self, command: FaceCommand) {
        log::debug!("Face command {}", command.name());
        self.policy.apply_command(command);
        self.redraw();
    }

    /// Starts a fresh page for the open message
    ///
    /// Text already on the page is discarded; the face and text start position
    /// are taken from the policy as it is now.
    pub fn redraw(&mut self) {
        let metrics = match &self.active {
            Some(active) => self.metrics(active.face.as_ref()),
            None => return,
        };
        if let Some(active) = self.active.as_mut() {
            active.new_page(&metrics);
        }
    }

    /// Processes one token; false when nothing can be typed right now
    fn step(&mut self) -> bool {
        let (token, metrics) = match &self.active {
            Some(active) if active.state() == MessageState::Typing => (
                active.tokens[active.cursor].clone(),
                self.metrics(active.face.as_ref()),
            ),
            _ => return false,
        };
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        match token {
            TextToken::Char(c) => {
                if active.put_char(c, &metrics) {
                    active.cursor += 1;
                }
            }
            TextToken::NewLine => {
                active.cursor += 1;
                active.new_line(&metrics);
            }
            TextToken::Escape(code) => {
                active.cursor += 1;
                match EscapeCode::parse(&code) {
                    Some(escape) => {
                        self.policy.apply_command(escape.into());
                        self.redraw();
                    }
                    None => log::trace!("Skipping escape code \\{}", code),
                }
            }
        }
        true
    }

    /// Draws the window, face and page text
    pub fn render<S: WindowSurface>(&self, surface: &mut S) -> Result<(), String> {
        let Some(active) = &self.active else {
            return Ok(());
        };

        let padding = self.config.padding;
        let frame = Rect::new(self.x, self.y, self.config.width, self.config.height);
        surface.draw_frame(frame, &self.style)?;

        let origin_x = self.x + padding as i32;
        let origin_y = self.y + padding as i32;

        if let Some(face) = active.face.as_ref().filter(|f| !f.is_empty()) {
            let placement =
                self.policy
                    .compute_draw_rect(self.config.width, padding, self.layout.face_width);
            let blit = self.layout.blit_region(
                face.index,
                self.layout.face_width,
                self.layout.face_height,
            );
            let dest = Rect::new(
                origin_x + placement.x + blit.offset_x,
                origin_y + placement.y + blit.offset_y,
                blit.source.width(),
                blit.source.height(),
            );
            surface.blit_face(&face.name, blit.source, dest, placement.mirrored)?;
        }

        // Centre glyphs vertically in their line
        let glyph_height = (GLYPH_HEIGHT * self.config.text_scale) as i32;
        let text_offset_y = (self.config.line_height as i32 - glyph_height).max(0) / 2;

        for line in &active.lines {
            surface.draw_text(
                &line.text,
                origin_x + line.x,
                origin_y + line.y + text_offset_y,
                self.text_color,
                self.config.text_scale,
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{DisplaySide, FlipMode};
    use crate::gui::surface::testing::{DrawCall, RecordingSurface};

    fn window(side: DisplaySide, mode: FlipMode) -> MessageWindow {
        MessageWindow::new(
            FacePlacementPolicy::new(side, mode),
            FaceSheetLayout::default(),
            MessageConfig::default(),
            624,
        )
    }

    fn typed(window: &mut MessageWindow) {
        while window.state() == MessageState::Typing {
            window.update();
        }
    }

    fn page_text(window: &MessageWindow) -> Vec<String> {
        window.page_lines().iter().map(|l| l.text.clone()).collect()
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Hi\\sfr\\C[2]!\n\\\\");
        assert_eq!(
            tokens,
            vec![
                TextToken::Char('H'),
                TextToken::Char('i'),
                TextToken::Escape("SFR".to_string()),
                TextToken::Escape("C".to_string()),
                TextToken::Char('!'),
                TextToken::NewLine,
                TextToken::Char('\\'),
            ]
        );
        assert_eq!(tokenize("\\."), vec![TextToken::Escape(".".to_string())]);
    }

    #[test]
    fn test_left_face_indents_text() {
        let mut window = window(DisplaySide::Left, FlipMode::Never);
        window.push(Message::with_face("Actor1", 0, "Hello"));
        typed(&mut window);

        assert_eq!(window.page_lines().len(), 1);
        assert_eq!(window.page_lines()[0].x, 168);
        assert_eq!(window.page_lines()[0].text, "Hello");
        assert_eq!(window.state(), MessageState::WaitingToClose);
    }

    #[test]
    fn test_no_face_starts_at_zero() {
        let mut window = window(DisplaySide::Left, FlipMode::Never);
        window.push(Message::with_face("", 0, "Hello"));
        typed(&mut window);
        assert_eq!(window.page_lines()[0].x, 0);

        let mut surface = RecordingSurface::default();
        window.render(&mut surface).unwrap();
        assert!(surface.faces().is_empty());
    }

    #[test]
    fn test_escape_code_moves_face_and_discards_page() {
        let mut window = window(DisplaySide::Left, FlipMode::AutoLeft);
        window.push(Message::with_face("Actor1", 0, "Before\\SFR After"));
        typed(&mut window);

        assert_eq!(window.policy().side(), DisplaySide::Right);
        assert!(!window.policy().flip_enabled());
        assert_eq!(page_text(&window), vec![" After".to_string()]);
        assert_eq!(window.page_lines()[0].x, 0);
    }

    #[test]
    fn test_toggle_escape_code() {
        let mut window = window(DisplaySide::Right, FlipMode::Never);
        window.push(Message::with_face("Actor1", 0, "\\sftA"));
        typed(&mut window);
        assert_eq!(window.policy().side(), DisplaySide::Left);
        assert_eq!(window.page_lines()[0].x, 168);
    }

    #[test]
    fn test_unknown_escape_codes_are_skipped() {
        let mut window = window(DisplaySide::Left, FlipMode::Never);
        window.push(Message::new("A\\C[4]B\\."));
        typed(&mut window);
        assert_eq!(page_text(&window), vec!["AB".to_string()]);
    }

    #[test]
    fn test_host_command_redraws_open_message() {
        let mut window = window(DisplaySide::Left, FlipMode::AutoLeft);
        window.push(Message::with_face("Actor1", 0, "Hello there"));
        for _ in 0..5 {
            window.update();
        }
        assert_eq!(page_text(&window), vec!["Hello".to_string()]);

        window.handle_face_command(FaceCommand::ShowOnRight);
        assert!(window.page_lines().is_empty());

        typed(&mut window);
        assert_eq!(page_text(&window), vec![" there".to_string()]);
        assert_eq!(window.page_lines()[0].x, 0);
    }

    #[test]
    fn test_host_command_while_closed() {
        let mut window = window(DisplaySide::Left, FlipMode::AutoLeft);
        window.handle_face_command(FaceCommand::ToggleSide);
        assert_eq!(window.state(), MessageState::Closed);
        assert_eq!(window.policy().side(), DisplaySide::Right);
    }

    #[test]
    fn test_render_face_on_right_mirrored() {
        let mut window = window(DisplaySide::Right, FlipMode::AutoRight);
        window.push(Message::with_face("Actor1", 5, "Hi"));
        typed(&mut window);

        let mut surface = RecordingSurface::default();
        window.render(&mut surface).unwrap();

        // 816 - 2 * 18 - 144 = 636, plus the padding origin
        let expected = DrawCall::Face {
            sheet: "Actor1".to_string(),
            source: Rect::new(144, 144, 144, 144),
            dest: Rect::new(18 + 636, 444 + 18, 144, 144),
            mirrored: true,
        };
        assert_eq!(surface.faces(), vec![&expected]);
        assert_eq!(surface.calls[0], DrawCall::Frame(Rect::new(0, 444, 816, 180)));
    }

    #[test]
    fn test_render_text_positions() {
        let mut window = window(DisplaySide::Left, FlipMode::Never);
        window.push(Message::with_face("Actor1", 0, "Hi\nYo"));
        typed(&mut window);

        let mut surface = RecordingSurface::default();
        window.render(&mut surface).unwrap();

        let texts = surface.texts();
        assert_eq!(texts.len(), 2);
        // Glyphs are 21px tall in a 36px line
        assert_eq!(
            texts[1],
            &DrawCall::Text {
                text: "Yo".to_string(),
                x: 18 + 168,
                y: 444 + 18 + 36 + 7,
            }
        );
    }

    #[test]
    fn test_word_wrap() {
        let config = MessageConfig {
            width: 216,
            ..Default::default()
        };
        let mut window = MessageWindow::new(
            FacePlacementPolicy::new(DisplaySide::Left, FlipMode::Never),
            FaceSheetLayout::default(),
            config,
            624,
        );
        window.push(Message::new("aaaa bbbb cccc"));
        typed(&mut window);

        let lines = window.page_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text.trim_end(), "aaaa bbbb");
        assert_eq!(lines[1], PageLine { x: 0, y: 36, text: "cccc".to_string() });
    }

    #[test]
    fn test_full_page_waits_for_input() {
        let mut window = window(DisplaySide::Left, FlipMode::Never);
        window.push(Message::new("1\n2\n3\n4\n5"));
        typed(&mut window);

        assert_eq!(window.state(), MessageState::WaitingForPage);
        assert_eq!(window.page_lines().len(), 4);

        window.advance();
        assert!(window.page_lines().is_empty());
        typed(&mut window);
        assert_eq!(window.page_lines(), &[PageLine { x: 0, y: 0, text: "5".to_string() }]);
        assert_eq!(window.state(), MessageState::WaitingToClose);
    }

    #[test]
    fn test_advance_finishes_page_then_closes() {
        let mut window = window(DisplaySide::Left, FlipMode::Never);
        window.push(Message::new("First"));
        window.push(Message::new("Second"));
        assert!(window.is_busy());

        window.advance();
        assert_eq!(page_text(&window), vec!["First".to_string()]);
        assert_eq!(window.state(), MessageState::WaitingToClose);

        window.advance();
        assert_eq!(window.state(), MessageState::Typing);
        window.advance();
        assert_eq!(page_text(&window), vec!["Second".to_string()]);

        window.advance();
        assert_eq!(window.state(), MessageState::Closed);
        assert!(!window.is_busy());
    }
}
