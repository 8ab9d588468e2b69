use crate::consts::{is_pool_number, MAX_NUMBER};
use crate::error::{MahjongError, MjResult};
use crate::hand::{ExposedGroup, Hand, WinMethod};
use crate::tiles::{Face, Operator, Tile, WildcardClass};
use std::str::FromStr;

const STRUCTURAL: [char; 10] = ['(', ')', '[', ']', '{', '}', '/', '|', '（', '）'];

fn malformed(msg: impl Into<String>) -> MahjongError {
    MahjongError::MalformedInput(msg.into())
}

/// Parses a single tile token: a number, an operator glyph, a wildcard name,
/// `<n>d` for a bonus tile or `<face>w` for a declared wildcard.
pub fn parse_tile(token: &str) -> MjResult<Tile> {
    if let Ok(op) = Operator::from_str(token) {
        return Ok(Tile::op(op));
    }
    if let Ok(class) = WildcardClass::from_str(token) {
        return Ok(Tile::wildcard(class));
    }
    if let Some(stem) = token.strip_suffix(&['w', 'W'][..]) {
        let face = parse_face(stem)?;
        return Tile::stand_in(face)
            .ok_or_else(|| malformed(format!("no wildcard can stand in for '{}'", stem)));
    }
    if let Some(stem) = token.strip_suffix(&['d', 'D'][..]) {
        let n: u8 = stem
            .parse()
            .map_err(|_| malformed(format!("bad bonus tile '{}'", token)))?;
        return Tile::bonus(n).ok_or_else(|| malformed(format!("{} has no bonus tile", n)));
    }

    let n: u8 = token
        .parse()
        .map_err(|_| malformed(format!("unknown tile '{}'", token)))?;
    if !is_pool_number(n) {
        return Err(malformed(format!("{} is not a printed tile", n)));
    }
    Ok(Tile::number(n))
}

fn parse_face(token: &str) -> MjResult<Face> {
    if let Ok(op) = Operator::from_str(token) {
        return Ok(Face::Op(op));
    }
    match token.parse::<u8>() {
        Ok(n) if n <= MAX_NUMBER => Ok(Face::Number(n)),
        _ => Err(malformed(format!("bad face '{}'", token))),
    }
}

fn tokenize(input: &str) -> Vec<String> {
    let mut spaced = String::with_capacity(input.len() * 2);
    for ch in input.chars() {
        match ch {
            ',' | '，' | '、' => spaced.push(' '),
            c if STRUCTURAL.contains(&c) => {
                spaced.push(' ');
                spaced.push(match c {
                    '（' => '(',
                    '）' => ')',
                    other => other,
                });
                spaced.push(' ');
            }
            c => spaced.push(c),
        }
    }
    spaced.split_whitespace().map(str::to_string).collect()
}

/// Whitespace or comma separated tiles, nothing else.
pub fn parse_tiles(input: &str) -> MjResult<Vec<Tile>> {
    tokenize(input).iter().map(|t| parse_tile(t)).collect()
}

#[derive(Default)]
struct HandBuilder {
    hand: Hand,
    groups: Vec<Vec<Tile>>,
    current: Vec<Tile>,
    separated: bool,
    exposed: Option<(Vec<Tile>, bool)>,
    in_win: bool,
    method: Option<Vec<String>>,
}

impl HandBuilder {
    fn push_tile(&mut self, tile: Tile) -> MjResult<()> {
        if let Some((tiles, _)) = self.exposed.as_mut() {
            if self.in_win {
                return Err(malformed("winning tile cannot sit in an exposed group"));
            }
            tiles.push(tile);
            return Ok(());
        }
        if self.in_win {
            if self.hand.win_tile.is_some() {
                return Err(malformed("only one winning tile may be marked"));
            }
            self.hand.win_tile = Some(tile);
        }
        self.current.push(tile);
        Ok(())
    }

    fn token(&mut self, token: &str) -> MjResult<()> {
        if let Some(words) = self.method.as_mut() {
            if token == "}" {
                let text = words.join("");
                let method = WinMethod::from_str(&text)
                    .map_err(|_| malformed(format!("unknown win method '{}'", text)))?;
                self.hand.method = Some(method);
                self.method = None;
            } else {
                words.push(token.to_string());
            }
            return Ok(());
        }

        match token {
            "(" => {
                if self.exposed.is_some() {
                    return Err(malformed("nested exposed group"));
                }
                self.exposed = Some((Vec::new(), false));
            }
            ")" => {
                let (tiles, concealed) = self
                    .exposed
                    .take()
                    .ok_or_else(|| malformed("unbalanced ')'"))?;
                self.hand.exposed.push(ExposedGroup::from_tiles(tiles, concealed)?);
            }
            "an" | "暗" if self.exposed.is_some() => {
                if let Some((_, concealed)) = self.exposed.as_mut() {
                    *concealed = true;
                }
            }
            "[" => {
                if self.in_win {
                    return Err(malformed("nested '['"));
                }
                self.in_win = true;
            }
            "]" => {
                if !self.in_win {
                    return Err(malformed("unbalanced ']'"));
                }
                self.in_win = false;
            }
            "{" => {
                if self.hand.method.is_some() {
                    return Err(malformed("win method given twice"));
                }
                self.method = Some(Vec::new());
            }
            "}" => return Err(malformed("unbalanced '}'")),
            "/" | "|" => {
                if self.exposed.is_some() || self.in_win {
                    return Err(malformed("group separator inside brackets"));
                }
                self.separated = true;
                if !self.current.is_empty() {
                    self.groups.push(std::mem::take(&mut self.current));
                }
            }
            tile => {
                let tile = parse_tile(tile)?;
                self.push_tile(tile)?;
            }
        }
        Ok(())
    }

    fn finish(mut self) -> MjResult<Hand> {
        if self.exposed.is_some() {
            return Err(malformed("unclosed '('"));
        }
        if self.in_win {
            return Err(malformed("unclosed '['"));
        }
        if self.method.is_some() {
            return Err(malformed("unclosed '{'"));
        }

        if self.separated {
            if !self.current.is_empty() {
                self.groups.push(std::mem::take(&mut self.current));
            }
            self.hand.concealed = self.groups.iter().flatten().copied().collect();
            self.hand.declared_groups = Some(self.groups);
        } else {
            self.hand.concealed = self.current;
        }
        Ok(self.hand)
    }
}

/// Parses full hand notation.
///
/// `( … )` marks an exposed group (one, four or five tiles, `an` for a
/// concealed kong), `/` or `|` separates declared concealed groups,
/// `[t]` marks the winning tile and `{m}` the win method.
pub fn parse_hand(input: &str) -> MjResult<Hand> {
    let mut builder = HandBuilder::default();
    for token in tokenize(input) {
        builder.token(&token)?;
    }
    builder.finish()
}

/// Renders tiles back into notation.
pub fn format_tiles(tiles: &[Tile]) -> String {
    tiles
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
