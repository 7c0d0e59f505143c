use crate::theme;
use crate::utils::js_random_seed;
use clap::Args;
use tabelito_core as game;
use game::Instant;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TileMsg {
    Clicked(game::Coord2),
    EntryDone {
        coords: game::Coord2,
        entry: String,
    },
}

/// CSS vocabulary for a game tile: solved tiles turn transparent so the
/// backdrop shows through, wrong entries are marked, and after resolution the
/// leftover tiles also lose their border.
fn tile_classes(tile: &game::Tile, hinted: bool) -> Classes {
    use game::Tile::*;

    let mut class = classes!(
        "tile",
        "game-tile",
        match tile {
            Unsolved => classes!(),
            Incorrect(_) => classes!("wrong-solution"),
            Correct => classes!("transparent-tile"),
            Cleared => classes!("transparent-tile", "borderless-tile"),
        }
    );
    if hinted {
        class.push("suggested-tile");
    }
    class
}

fn tile_text(tile: &game::Tile, product: game::CellCount) -> String {
    use game::Tile::*;

    match tile {
        Unsolved | Cleared => String::new(),
        Incorrect(entry) => entry.clone(),
        Correct => product.to_string(),
    }
}

fn header_classes(header: &game::HeaderTile) -> Classes {
    use game::HeaderKind::*;

    classes!(
        "tile",
        match header.kind {
            Column => "col-header-tile",
            Row => "row-header-tile",
        },
        header.highlighted.then_some("current-puzzle")
    )
}

#[derive(Properties, Clone, PartialEq)]
struct HeaderProps {
    header: game::HeaderTile,
}

#[function_component(HeaderTileView)]
fn header_tile_component(props: &HeaderProps) -> Html {
    let class = header_classes(&props.header);
    html! {
        <div {class}>{ props.header.index }</div>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    x: game::Coord,
    y: game::Coord,
    tile: game::Tile,
    product: game::CellCount,
    #[prop_or_default]
    hinted: bool,
    #[prop_or_default]
    editing: bool,
    #[prop_or_default]
    input_ref: NodeRef,
    callback: Callback<TileMsg>,
}

#[function_component(TileView)]
fn tile_component(props: &TileProps) -> Html {
    let TileProps {
        x,
        y,
        tile,
        product,
        hinted,
        editing,
        input_ref,
        callback,
    } = props.clone();

    let class = tile_classes(&tile, hinted);

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            callback.emit(TileMsg::Clicked((x, y)));
            log::trace!("({}, {}) clicked", x, y);
        })
    };

    let content = if editing {
        // commit on blur; Enter just blurs the entry, which triggers the
        // same commit path
        let onblur = Callback::from(move |e: FocusEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            callback.emit(TileMsg::EntryDone {
                coords: (x, y),
                entry: input.value(),
            });
        });
        let onkeydown = Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                let input: HtmlInputElement = e.target_unchecked_into();
                let _ = input.blur();
            }
        });
        html! {
            <input ref={input_ref} type="text" {onblur} {onkeydown}/>
        }
    } else {
        html! { { tile_text(&tile, product) } }
    };

    html! {
        <div {class} {onclick}>{ content }</div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    engine: game::PlayEngine,
    backdrop: &'static str,
    input_ref: NodeRef,
}

impl GameView {
    fn click_tile(&mut self, coords: game::Coord2) -> bool {
        if self.engine.editing_tile() == Some(coords) {
            // the entry surface is already open here, keep it as-is
            return false;
        }
        self.engine
            .begin_edit(coords, Instant::now())
            .map_or(false, |outcome| outcome.has_update())
    }

    fn commit_entry(&mut self, coords: game::Coord2, entry: &str) -> bool {
        let outcome = self.engine.commit_edit(coords, entry, Instant::now());
        log::debug!("commit at {:?}: {:?}", coords, outcome);
        // the entry surface goes away even when the tile did not change
        true
    }

    fn completion_dialog(&self) -> Html {
        if !self.engine.is_finished() {
            return Html::default();
        }
        let elapsed = self.engine.elapsed_secs(Instant::now());
        html! {
            <dialog id="game-complete-modal" open={true}>
                <article>
                    <h2>{"Puzzle complete!"}</h2>
                    <p>
                        {"Solved in "}
                        <span id="modal-time-elapsed">{ elapsed }</span>
                        {" seconds."}
                    </p>
                </article>
            </dialog>
        }
    }
}

impl Component for GameView {
    type Message = TileMsg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        log::debug!("engine seed: {}", seed);
        Self {
            engine: game::PlayEngine::new(game::GameConfig::classic(), seed),
            backdrop: theme::todays_backdrop(),
            input_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            TileMsg::Clicked(coords) => self.click_tile(coords),
            TileMsg::EntryDone { coords, entry } => self.commit_entry(coords, &entry),
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
            let _ = input.focus();
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (cols, rows) = self.engine.size();
        let hinted = self.engine.hinted_tile();
        let editing = self.engine.editing_tile();
        let grid_style = format!("background-image: url('/img/{}')", self.backdrop);
        let callback = ctx.link().callback(|msg| msg);

        html! {
            <div class="tabelito">
                <div id="col-header">
                    {
                        for self.engine.col_headers().into_iter().map(|header| html! {
                            <HeaderTileView {header}/>
                        })
                    }
                </div>
                <div id="row-header">
                    {
                        for self.engine.row_headers().into_iter().map(|header| html! {
                            <HeaderTileView {header}/>
                        })
                    }
                </div>
                <div id="game-grid" style={grid_style}>
                    {
                        for (0..rows).flat_map(|y| (0..cols).map(move |x| (x, y))).map(|pos| {
                            let (x, y) = pos;
                            let tile = self.engine[pos].clone();
                            let product = self.engine.table()[pos];
                            html! {
                                <TileView
                                    {x}
                                    {y}
                                    {tile}
                                    {product}
                                    hinted={hinted == Some(pos)}
                                    editing={editing == Some(pos)}
                                    input_ref={self.input_ref.clone()}
                                    callback={callback.clone()}
                                />
                            }
                        })
                    }
                </div>
                { self.completion_dialog() }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_classes_follow_solved_state() {
        assert_eq!(
            tile_classes(&game::Tile::Unsolved, false),
            classes!("tile", "game-tile")
        );
        assert_eq!(
            tile_classes(&game::Tile::Incorrect("7".to_string()), false),
            classes!("tile", "game-tile", "wrong-solution")
        );
        assert_eq!(
            tile_classes(&game::Tile::Correct, false),
            classes!("tile", "game-tile", "transparent-tile")
        );
        assert_eq!(
            tile_classes(&game::Tile::Cleared, false),
            classes!("tile", "game-tile", "transparent-tile", "borderless-tile")
        );
    }

    #[test]
    fn suggested_marker_is_added_on_top() {
        assert_eq!(
            tile_classes(&game::Tile::Unsolved, true),
            classes!("tile", "game-tile", "suggested-tile")
        );
    }

    #[test]
    fn tile_text_shows_the_entry_or_the_product() {
        assert_eq!(tile_text(&game::Tile::Unsolved, 12), "");
        assert_eq!(tile_text(&game::Tile::Incorrect("7".to_string()), 12), "7");
        assert_eq!(tile_text(&game::Tile::Correct, 12), "12");
        // resolution blanks the tile without revealing the product
        assert_eq!(tile_text(&game::Tile::Cleared, 12), "");
    }

    #[test]
    fn header_highlight_maps_to_current_puzzle_class() {
        let header = game::HeaderTile {
            index: 3,
            kind: game::HeaderKind::Column,
            highlighted: false,
        };
        assert_eq!(header_classes(&header), classes!("tile", "col-header-tile"));

        let header = game::HeaderTile {
            index: 4,
            kind: game::HeaderKind::Row,
            highlighted: true,
        };
        assert_eq!(
            header_classes(&header),
            classes!("tile", "row-header-tile", "current-puzzle")
        );
    }
}
