//! Interactive main menu.
//!
//! The menu loops until the user picks `0` or input ends. Each entry maps
//! to one [`MenuChoice`]; a failing action prints its error and the menu is
//! shown again.

use std::io::{BufRead, Write};

use antgrid::{Coord, Graph, Vertex};
use anyhow::Context;

use crate::{
    console::{Console, is_end_of_input},
    ctx::AppContext,
    io_ops,
    lang::MessageId,
};

/// Main menu entries, numbered as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    Load,
    Dfs,
    Bfs,
    AllPaths,
    Intersections,
    DangerOverlaps,
    Insert,
    Remove,
    PrintAntennas,
    PrintEdges,
    PrintDangerPoints,
    ClearLists,
    SaveMatrix,
    Effects,
    SaveAntennas,
    SaveEffects,
    SaveEffectsDots,
}

impl TryFrom<u32> for MenuChoice {
    type Error = anyhow::Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        use MenuChoice::*;
        let choice = match value {
            0 => Exit,
            1 => Load,
            2 => Dfs,
            3 => Bfs,
            4 => AllPaths,
            5 => Intersections,
            6 => DangerOverlaps,
            7 => Insert,
            8 => Remove,
            9 => PrintAntennas,
            10 => PrintEdges,
            11 => PrintDangerPoints,
            12 => ClearLists,
            13 => SaveMatrix,
            14 => Effects,
            15 => SaveAntennas,
            16 => SaveEffects,
            17 => SaveEffectsDots,
            other => bail!("no menu entry {other}"),
        };
        Ok(choice)
    }
}

/// Handler for the interactive menu.
pub struct MenuHandler<'a, R, W> {
    ctx: &'a mut AppContext,
    console: &'a mut Console<R, W>,
}

impl<'a, R: BufRead, W: Write> MenuHandler<'a, R, W> {
    pub fn new(ctx: &'a mut AppContext, console: &'a mut Console<R, W>) -> Self {
        Self { ctx, console }
    }

    /// Runs the menu loop until exit or end of input.
    ///
    /// # Errors
    ///
    /// Only console write failures end the loop with an error.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.show_menu()?;
            let line = match self.console.read_line() {
                Ok(line) => line,
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    debug!("input closed, leaving menu");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            let Some(choice) = line
                .trim()
                .parse::<u32>()
                .ok()
                .and_then(|n| MenuChoice::try_from(n).ok())
            else {
                self.console
                    .error(self.ctx.tr(MessageId::ErrInvalidChoice))?;
                continue;
            };

            if choice == MenuChoice::Exit {
                self.console.println(self.ctx.tr(MessageId::Quit))?;
                return Ok(());
            }

            debug!("menu choice {choice:?}");
            if let Err(e) = self.handle(choice) {
                if is_end_of_input(&e) {
                    return Ok(());
                }
                warn!("{choice:?} failed: {e:#}");
                self.console.error(format!("{e:#}"))?;
            }
        }
    }

    fn show_menu(&mut self) -> anyhow::Result<()> {
        self.console.heading(self.ctx.tr(MessageId::MenuTitle))?;
        self.console.println(self.ctx.tr(MessageId::MenuOptions))?;
        self.console.print(self.ctx.tr(MessageId::PromptChoice))?;
        Ok(())
    }

    /// Executes a single menu action.
    pub fn handle(&mut self, choice: MenuChoice) -> anyhow::Result<()> {
        match choice {
            MenuChoice::Exit => {}
            MenuChoice::Load => self.handle_load()?,
            MenuChoice::Dfs => self.handle_traversal(false)?,
            MenuChoice::Bfs => self.handle_traversal(true)?,
            MenuChoice::AllPaths => self.handle_all_paths()?,
            MenuChoice::Intersections => self.handle_intersections()?,
            MenuChoice::DangerOverlaps => self.handle_danger_overlaps()?,
            MenuChoice::Insert => self.handle_insert()?,
            MenuChoice::Remove => self.handle_remove()?,
            MenuChoice::PrintAntennas => self.handle_print_antennas()?,
            MenuChoice::PrintEdges => self.handle_print_edges()?,
            MenuChoice::PrintDangerPoints => self.handle_print_danger_points()?,
            MenuChoice::ClearLists => self.handle_clear()?,
            MenuChoice::SaveMatrix => self.handle_save_matrix()?,
            MenuChoice::Effects => self.handle_effects()?,
            MenuChoice::SaveAntennas => self.handle_save_antennas()?,
            MenuChoice::SaveEffects => self.handle_save_effects(false)?,
            MenuChoice::SaveEffectsDots => self.handle_save_effects(true)?,
        }
        Ok(())
    }

    fn handle_load(&mut self) -> anyhow::Result<()> {
        let files = io_ops::list_files(&self.ctx.config.input_dir)?;
        let name = io_ops::prompt_file_selection(self.console, &self.ctx.messages, &files)?;
        let path = self.ctx.input_path(&name);
        let io_msg = self.ctx.tr(MessageId::ErrIo).to_string();
        self.ctx.load_graph(&path).context(io_msg)?;
        self.console.success(self.ctx.tr(MessageId::SuccessLoad))?;
        Ok(())
    }

    fn handle_traversal(&mut self, breadth_first: bool) -> anyhow::Result<()> {
        let graph = self.ctx.graph()?;
        let start = prompt_index(self.console, graph, self.ctx.tr(MessageId::PromptVertexIndex))?;
        let console = &mut *self.console;
        let print = |_: usize, v: &Vertex| -> anyhow::Result<()> {
            console.println(v)?;
            Ok(())
        };
        if breadth_first {
            graph.bfs(start, print)
        } else {
            graph.dfs(start, print)
        }
    }

    fn handle_all_paths(&mut self) -> anyhow::Result<()> {
        let graph = self.ctx.graph()?;
        let src = prompt_index(self.console, graph, self.ctx.tr(MessageId::PromptSourceIndex))?;
        let dst = prompt_index(self.console, graph, self.ctx.tr(MessageId::PromptDestIndex))?;
        let paths = graph.all_paths(src, dst, Some(self.ctx.config.max_paths))?;

        if paths.is_empty() {
            self.console.println(self.ctx.tr(MessageId::ErrNoPaths))?;
            return Ok(());
        }
        if paths.len() == self.ctx.config.max_paths {
            warn!("path listing stopped at max_paths = {}", paths.len());
        }

        self.console.heading(format!(
            "{} ({}):",
            self.ctx.tr(MessageId::PathsFound),
            paths.len()
        ))?;
        for path in &paths {
            self.console.println(format_path(graph, path))?;
        }
        Ok(())
    }

    fn handle_intersections(&mut self) -> anyhow::Result<()> {
        self.ctx.graph()?;
        let (a, b) = self.prompt_frequency_pair()?;
        let found = self.ctx.graph()?.intersections(a, b);
        if found.is_empty() {
            self.console
                .println(self.ctx.tr(MessageId::ErrIntersectionsNotFound))?;
            return Ok(());
        }
        self.console.heading(format!(
            "{} {a} / {b}:",
            self.ctx.tr(MessageId::Intersections)
        ))?;
        self.print_coords(&found)
    }

    fn handle_danger_overlaps(&mut self) -> anyhow::Result<()> {
        self.ctx.graph()?;
        let (a, b) = self.prompt_frequency_pair()?;
        let found = self.ctx.graph()?.danger_overlaps(a, b);
        if found.is_empty() {
            self.console
                .println(self.ctx.tr(MessageId::ErrIntersectionsNotFound))?;
            return Ok(());
        }
        self.console.heading(format!(
            "{} {a} / {b}:",
            self.ctx.tr(MessageId::DangerOverlaps)
        ))?;
        self.print_coords(&found)
    }

    fn handle_insert(&mut self) -> anyhow::Result<()> {
        self.ctx.graph()?;
        let freq = self.prompt_frequency(MessageId::PromptFrequency)?;
        let (row, col) = self
            .console
            .prompt_coord(self.ctx.tr(MessageId::PromptCoordinates))
            .with_context(|| self.ctx.tr(MessageId::ErrInvalidInput).to_string())?;

        let idx = self.ctx.graph_mut()?.insert_vertex(freq, row, col)?;
        info!("inserted antenna {freq} at ({row},{col}) as vertex {idx}");
        self.console.success(format!(
            "{}: [{idx}] {freq} {}",
            self.ctx.tr(MessageId::SuccessInsert),
            Coord::new(row, col)
        ))?;
        Ok(())
    }

    fn handle_remove(&mut self) -> anyhow::Result<()> {
        let graph = self.ctx.graph()?;
        let idx = prompt_index(self.console, graph, self.ctx.tr(MessageId::PromptVertexIndex))?;
        let removed = self.ctx.graph_mut()?.remove_vertex(idx)?;
        info!("removed vertex {idx} ({removed})");
        self.console.success(format!(
            "{}: {} {}",
            self.ctx.tr(MessageId::SuccessRemove),
            removed.frequency,
            removed.position
        ))?;
        Ok(())
    }

    fn handle_print_antennas(&mut self) -> anyhow::Result<()> {
        let graph = self.ctx.graph()?;
        self.console.heading(format!(
            "{} ({}):",
            self.ctx.tr(MessageId::AntennasHeader),
            graph.vertex_count()
        ))?;
        self.console.println("|   # | F | Row | Col |")?;
        self.console.println("+-----+---+-----+-----+")?;
        for (i, v) in graph.vertices().iter().enumerate() {
            self.console.println(format!(
                "| {i:>3} | {} | {:>3} | {:>3} |",
                v.frequency, v.position.row, v.position.col
            ))?;
        }
        Ok(())
    }

    fn handle_print_edges(&mut self) -> anyhow::Result<()> {
        let graph = self.ctx.graph()?;
        let edges = graph.edges();
        if edges.is_empty() {
            self.console.println(self.ctx.tr(MessageId::ErrNothingFound))?;
            return Ok(());
        }
        self.console.heading(format!(
            "{} ({}):",
            self.ctx.tr(MessageId::EdgesHeader),
            edges.len()
        ))?;
        let vertices = graph.vertices();
        for (a, b) in edges {
            self.console.println(format!(
                "[{a}] {} <-> [{b}] {}",
                vertices[a], vertices[b]
            ))?;
        }
        Ok(())
    }

    fn handle_print_danger_points(&mut self) -> anyhow::Result<()> {
        self.ctx.graph()?;
        let freq = self.prompt_frequency(MessageId::PromptFrequency)?;
        let found = self.ctx.graph()?.danger_points(freq);
        if found.is_empty() {
            self.console.println(self.ctx.tr(MessageId::ErrNothingFound))?;
            return Ok(());
        }
        self.console.heading(format!(
            "{} {freq}:",
            self.ctx.tr(MessageId::DangerPoints)
        ))?;
        self.print_coords(&found)
    }

    fn handle_clear(&mut self) -> anyhow::Result<()> {
        self.ctx.graph_mut()?.clear_edges();
        self.console.success(self.ctx.tr(MessageId::ListsCleared))?;
        Ok(())
    }

    fn handle_save_matrix(&mut self) -> anyhow::Result<()> {
        let text = self.ctx.graph()?.to_dot_map()?;
        self.save_output(&text)
    }

    fn handle_effects(&mut self) -> anyhow::Result<()> {
        let effects = self.ctx.refresh_effects()?.clone();
        if effects.is_empty() {
            self.console.println(self.ctx.tr(MessageId::ErrNothingFound))?;
            return Ok(());
        }
        self.console.heading(format!(
            "{} ({}):",
            self.ctx.tr(MessageId::EffectsHeader),
            effects.len()
        ))?;
        self.console.println("Row | Column")?;
        self.console.println("-------------")?;
        for p in effects.iter() {
            self.console.println(format!("{:>3} | {:>6}", p.row, p.col))?;
        }
        Ok(())
    }

    fn handle_save_antennas(&mut self) -> anyhow::Result<()> {
        let text = self.ctx.graph()?.antennas().to_table();
        self.save_output(&text)
    }

    fn handle_save_effects(&mut self, dot_map: bool) -> anyhow::Result<()> {
        let effects = self.ctx.refresh_effects()?;
        let text = if dot_map {
            effects.to_dot_map()?
        } else {
            effects.to_table()
        };
        self.save_output(&text)
    }

    fn save_output(&mut self, text: &str) -> anyhow::Result<()> {
        let name = io_ops::prompt_filename(self.console, &self.ctx.messages)?;
        let path = self.ctx.output_path(&name)?;

        if path.exists()
            && self.ctx.config.confirm_overwrite
            && !io_ops::confirm_overwrite(self.console, &self.ctx.messages, &path)?
        {
            self.console.println(self.ctx.tr(MessageId::NotOverwritten))?;
            return Ok(());
        }

        antgrid::grid::write_text(&path, text)
            .with_context(|| self.ctx.tr(MessageId::ErrIo).to_string())?;
        info!("wrote {}", path.display());
        self.console.success(format!(
            "{}: {}",
            self.ctx.tr(MessageId::SuccessSave),
            path.display()
        ))?;
        Ok(())
    }

    fn prompt_frequency(&mut self, id: MessageId) -> anyhow::Result<char> {
        let freq = self
            .console
            .prompt_char(self.ctx.tr(id))
            .with_context(|| self.ctx.tr(MessageId::ErrInvalidInput).to_string())?;
        Ok(freq)
    }

    fn prompt_frequency_pair(&mut self) -> anyhow::Result<(char, char)> {
        let a = self.prompt_frequency(MessageId::PromptFrequencyA)?;
        let b = self.prompt_frequency(MessageId::PromptFrequencyB)?;
        Ok((a, b))
    }

    fn print_coords(&mut self, coords: &[Coord]) -> anyhow::Result<()> {
        for c in coords {
            self.console.println(c)?;
        }
        Ok(())
    }
}

/// Asks for a vertex index, showing the valid range.
fn prompt_index<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    graph: &Graph,
    label: &str,
) -> anyhow::Result<usize> {
    if graph.is_empty() {
        return Err(antgrid::GridError::Empty.into());
    }
    let msg = format!("{label} (0-{}): ", graph.vertex_count() - 1);
    console.prompt_parse(msg)
}

/// Formats a path as `(r,c) -> (r,c) -> ...`.
pub fn format_path(graph: &Graph, path: &[usize]) -> String {
    path.iter()
        .filter_map(|&i| graph.vertex(i))
        .map(|v| v.position.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_numbers() {
        assert_eq!(MenuChoice::try_from(0).unwrap(), MenuChoice::Exit);
        assert_eq!(MenuChoice::try_from(13).unwrap(), MenuChoice::SaveMatrix);
        assert_eq!(
            MenuChoice::try_from(17).unwrap(),
            MenuChoice::SaveEffectsDots
        );
        assert!(MenuChoice::try_from(18).is_err());
    }

    #[test]
    fn test_format_path() {
        let g = Graph::from_dot_map("a.a\n...\na..\n");
        assert_eq!(format_path(&g, &[0, 2, 1]), "(0,0) -> (2,0) -> (0,2)");
        assert_eq!(format_path(&g, &[1]), "(0,2)");
    }
}
