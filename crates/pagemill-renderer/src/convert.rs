//! Event-driven Markdown to HTML conversion.

use std::fmt::Write;
use std::sync::LazyLock;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;

use crate::collab::{Highlighter, ImageProxy};
use crate::slug::escape_html;

/// Bare `http(s)://` URL in prose text.
static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<>]+").expect("invalid bare-url regex"));

/// Markdown to HTML converter.
///
/// Walks pulldown-cmark events and emits XHTML-style markup (void elements
/// self-closed) so the output can be re-parsed by the DOM pass pipeline.
/// Headings render without ids; id assignment is a later DOM pass so that
/// manual `{: id="…"}` directives take precedence over generated slugs.
pub struct MarkdownConverter<'a> {
    output: String,
    image_class: &'a str,
    proxy: &'a dyn ImageProxy,
    highlighter: &'a dyn Highlighter,
    // Code block capture
    in_code: bool,
    code_lang: Option<String>,
    code_buf: String,
    // Image alt text capture
    in_image: bool,
    alt_buf: String,
    pending_image: Option<(String, String)>,
    // Suppresses autolinking inside explicit links
    in_link: bool,
    // Table rendering
    alignments: Vec<Alignment>,
    cell_index: usize,
    in_table_head: bool,
}

impl<'a> MarkdownConverter<'a> {
    /// Create a converter with the given collaborator seams.
    #[must_use]
    pub fn new(
        image_class: &'a str,
        proxy: &'a dyn ImageProxy,
        highlighter: &'a dyn Highlighter,
    ) -> Self {
        Self {
            output: String::with_capacity(4096),
            image_class,
            proxy,
            highlighter,
            in_code: false,
            code_lang: None,
            code_buf: String::new(),
            in_image: false,
            alt_buf: String::new(),
            pending_image: None,
            in_link: false,
            alignments: Vec::new(),
            cell_index: 0,
            in_table_head: false,
        }
    }

    /// Parser options: tables, strikethrough, and task lists.
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
    }

    /// Convert Markdown text to an HTML fragment string.
    #[must_use]
    pub fn convert(mut self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Self::parser_options());
        for event in parser {
            self.process_event(event);
        }
        self.output
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(&tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                write!(self.output, "<code>{}</code>", escape_html(&code)).unwrap();
            }
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => {
                if self.in_code {
                    self.code_buf.push('\n');
                } else {
                    self.output.push('\n');
                }
            }
            Event::HardBreak => self.output.push_str("<br />"),
            Event::Rule => self.output.push_str("<hr />"),
            Event::TaskListMarker(checked) => {
                if checked {
                    self.output
                        .push_str(r#"<input type="checkbox" checked="checked" disabled="disabled" /> "#);
                } else {
                    self.output
                        .push_str(r#"<input type="checkbox" disabled="disabled" /> "#);
                }
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: &Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if !self.in_code {
                    self.output.push_str("<p>");
                }
            }
            Tag::Heading { level, .. } => {
                write!(self.output, "<{level}>").unwrap();
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                self.in_code = true;
                self.code_lang = match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => {
                        info.split_whitespace().next().map(str::to_owned)
                    }
                    _ => None,
                };
                self.code_buf.clear();
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.alignments = alignments.clone();
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.cell_index = 0;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.cell_index = 0;
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = match self.alignments.get(self.cell_index) {
                    Some(Alignment::Left) => r#" style="text-align:left""#,
                    Some(Alignment::Center) => r#" style="text-align:center""#,
                    Some(Alignment::Right) => r#" style="text-align:right""#,
                    Some(Alignment::None) | None => "",
                };
                let tag = if self.in_table_head { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.output.push_str("<em>"),
            Tag::Strong => self.output.push_str("<strong>"),
            Tag::Strikethrough => self.output.push_str("<s>"),
            Tag::Link { dest_url, .. } => {
                self.in_link = true;
                write!(self.output, r#"<a href="{}">"#, escape_html(dest_url)).unwrap();
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.in_image = true;
                self.alt_buf.clear();
                self.pending_image = Some((self.proxy.rewrite(dest_url), title.to_string()));
            }
            Tag::Superscript => self.output.push_str("<sup>"),
            Tag::Subscript => self.output.push_str("<sub>"),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if !self.in_code {
                    self.output.push_str("</p>");
                }
            }
            TagEnd::Heading(level) => {
                write!(self.output, "</{level}>").unwrap();
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => self.finish_code_block(),
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::Image => {
                self.in_image = false;
                let alt = std::mem::take(&mut self.alt_buf);
                if let Some((src, title)) = self.pending_image.take() {
                    self.write_image(&src, &alt, &title);
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.in_table_head = false;
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.in_table_head {
                    "</th>"
                } else {
                    "</td>"
                });
                self.cell_index += 1;
            }
            TagEnd::Emphasis => self.output.push_str("</em>"),
            TagEnd::Strong => self.output.push_str("</strong>"),
            TagEnd::Strikethrough => self.output.push_str("</s>"),
            TagEnd::Link => {
                self.in_link = false;
                self.output.push_str("</a>");
            }
            TagEnd::Superscript => self.output.push_str("</sup>"),
            TagEnd::Subscript => self.output.push_str("</sub>"),
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_code {
            self.code_buf.push_str(text);
        } else if self.in_image {
            self.alt_buf.push_str(text);
        } else if self.in_link {
            self.output.push_str(&escape_html(text));
        } else {
            self.autolink(text);
        }
    }

    /// Write prose text, turning bare URLs into links.
    ///
    /// Trailing sentence punctuation after a URL stays outside the link.
    fn autolink(&mut self, text: &str) {
        let mut last = 0;
        for m in BARE_URL.find_iter(text) {
            let mut url = m.as_str();
            while let Some(stripped) = url.strip_suffix(['.', ',', ';', ':', '!', '?', ')']) {
                url = stripped;
            }
            if url.ends_with("://") {
                continue;
            }
            self.output.push_str(&escape_html(&text[last..m.start()]));
            let href = escape_html(url);
            write!(self.output, r#"<a href="{href}">{href}</a>"#).unwrap();
            last = m.start() + url.len();
        }
        self.output.push_str(&escape_html(&text[last..]));
    }

    fn finish_code_block(&mut self) {
        self.in_code = false;
        let lang = self.code_lang.take();
        let content = std::mem::take(&mut self.code_buf);

        if let Some(lang) = &lang {
            if let Some(html) = self.highlighter.highlight(lang, &content) {
                self.output.push_str(&html);
                return;
            }
        }

        match lang {
            Some(lang) => write!(
                self.output,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(&lang),
                escape_html(&content)
            )
            .unwrap(),
            None => {
                write!(
                    self.output,
                    "<pre><code>{}</code></pre>",
                    escape_html(&content)
                )
                .unwrap();
            }
        }
    }

    fn write_image(&mut self, src: &str, alt: &str, title: &str) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        if self.image_class.is_empty() {
            write!(
                self.output,
                r#"<img src="{}"{title_attr} alt="{}" />"#,
                escape_html(src),
                escape_html(alt)
            )
            .unwrap();
        } else {
            write!(
                self.output,
                r#"<img src="{}" class="{}"{title_attr} alt="{}" />"#,
                escape_html(src),
                escape_html(self.image_class),
                escape_html(alt)
            )
            .unwrap();
        }
    }
}
