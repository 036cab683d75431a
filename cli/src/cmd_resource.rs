// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Listing, lookup and deletion, shared by every resource.

use std::{error::Error, marker::PhantomData};

use clap::{ArgMatches, Command};
use colored::Colorize;
use diario_core::{Diario, Operation, Page, Record, ResourceApi, ui};

use crate::arg::{CommonArgs, ResourceArgs};
use crate::formatter::{Printable, print_records};
use crate::ui::TerminalUi;
use crate::util::OutputFormat;

#[derive(Debug, Clone)]
pub struct CmdList<R> {
    pub page: u32,
    pub search: Option<String>,
    pub output_format: OutputFormat,
    pub verbose: bool,
    _marker: PhantomData<R>,
}

impl<R: Printable> CmdList<R> {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        let args = ResourceArgs::new(R::KIND);
        Command::new(Self::NAME)
            .alias("ls")
            .about(format!("List {}", R::KIND.path()))
            .arg(ResourceArgs::page())
            .arg(args.search())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            page: ResourceArgs::get_page(matches),
            search: ResourceArgs::get_search(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
            _marker: PhantomData,
        }
    }

    pub async fn run<A: ResourceApi<R>>(self, diario: &Diario<A>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, kind = %R::KIND, "listing...");
        let ui = TerminalUi::default();
        let query = diario.query(self.page, self.search);
        let result = diario.dispatcher::<R>().list(&query).await;
        if let Some(page) = ui.settle(R::KIND, Operation::List, result) {
            print_page(&page, self.page, self.output_format, self.verbose);
        }
        Ok(())
    }
}

/// Print a page of a listing, with the empty state and the page position.
pub fn print_page<R: Printable>(
    page: &Page<Record<R>>,
    number: u32,
    output_format: OutputFormat,
    verbose: bool,
) {
    if output_format == OutputFormat::Table {
        if page.data.is_empty() {
            let message = match &page.message {
                Some(message) => message.clone(),
                None => format!("No {} found", R::KIND.path()),
            };
            println!("{}", message.italic());
            return;
        }

        if page.count > page.data.len() as u64 {
            let prompt = format!(
                "Page {number}: {} of {} {}",
                page.data.len(),
                page.count,
                R::KIND.path()
            );
            println!("{}", prompt.italic());
        }
    }

    print_records(&page.data, output_format, verbose);
}

#[derive(Debug, Clone)]
pub struct CmdGet<R> {
    pub id: i64,
    pub output_format: OutputFormat,
    pub verbose: bool,
    _marker: PhantomData<R>,
}

impl<R: Printable> CmdGet<R> {
    pub const NAME: &str = "get";

    pub fn command() -> Command {
        let args = ResourceArgs::new(R::KIND);
        Command::new(Self::NAME)
            .alias("show")
            .about(format!("Show one {}", R::KIND))
            .arg(args.id())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: ResourceArgs::get_id(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
            _marker: PhantomData,
        }
    }

    pub async fn run<A: ResourceApi<R>>(self, diario: &Diario<A>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, kind = %R::KIND, "fetching...");
        let ui = TerminalUi::default();
        let result = diario.dispatcher::<R>().get(self.id).await;
        if let Some(record) = ui.settle(R::KIND, Operation::Get, result) {
            print_records(&[record], self.output_format, self.verbose);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdDelete<R> {
    pub id: i64,
    pub yes: bool,
    _marker: PhantomData<R>,
}

impl<R: Printable> CmdDelete<R> {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        let args = ResourceArgs::new(R::KIND);
        Command::new(Self::NAME)
            .alias("rm")
            .about(format!("Delete a {}", R::KIND))
            .arg(args.id())
            .arg(CommonArgs::yes())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: ResourceArgs::get_id(matches),
            yes: CommonArgs::get_yes(matches),
            _marker: PhantomData,
        }
    }

    pub async fn run<A: ResourceApi<R>>(self, diario: &Diario<A>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, kind = %R::KIND, "deleting...");
        let ui = TerminalUi::new(self.yes);
        if !ui::confirm_delete(&ui, R::KIND, self.id) {
            println!("{}", "Nothing was deleted".italic());
            return Ok(());
        }

        let result = diario.dispatcher::<R>().delete(self.id).await;
        ui.settle(R::KIND, Operation::Delete, result);
        Ok(())
    }
}
