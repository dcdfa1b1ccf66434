//! The polling control loop: drain input, plan, emit, sleep.

use crate::config::{AgentConfig, EmitPolicy};
use crate::controller::Controller;
use crate::input::LineSource;
use crate::planner::Step;
use crate::protocol::Command;
use std::io::{self, Write};
use std::thread;
use tracing::info;

pub struct Agent<S, W> {
    config: AgentConfig,
    controller: Controller,
    source: S,
    out: W,
    cycles: u64,
}

impl<S: LineSource, W: Write> Agent<S, W> {
    pub fn new(config: AgentConfig, source: S, out: W) -> Self {
        let controller = Controller::new(config.maze, config.arrival_threshold);
        Self {
            config,
            controller,
            source,
            out,
            cycles: 0,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn send(&mut self, cmd: &Command) -> io::Result<()> {
        writeln!(self.out, "{}", cmd)
    }

    pub fn greet(&mut self) -> io::Result<()> {
        let cmd = Command::Greeting(self.config.name.clone());
        self.send(&cmd)?;
        self.out.flush()
    }

    /// One control cycle. Returns the planner step if the planner acted.
    pub fn cycle(&mut self) -> io::Result<Option<Step>> {
        for line in self.source.drain()? {
            self.controller.ingest_line(&line);
        }
        let step = self.controller.cycle();
        let emit = match self.config.emit {
            EmitPolicy::EveryCycle => true,
            EmitPolicy::OnPlan => step.is_some(),
        };
        if emit && let Some(t) = self.controller.target() {
            self.send(&Command::toward(t))?;
        }
        self.send(&Command::Heartbeat)?;
        self.out.flush()?;
        self.cycles += 1;
        Ok(step)
    }

    /// Greets, waits for the first observations, then cycles forever.
    pub fn run(&mut self) -> io::Result<()> {
        info!(
            "starting as {:?}: {}x{} maze, goal {}, arrival < {}, cycle {:?}, emit {:?}",
            self.config.name,
            self.config.maze.width,
            self.config.maze.height,
            self.config.maze.goal,
            self.config.arrival_threshold,
            self.config.interval,
            self.config.emit,
        );
        self.greet()?;
        thread::sleep(self.config.settle);
        loop {
            self.cycle()?;
            thread::sleep(self.config.interval);
        }
    }
}
