// Copyright 2024 The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use fourway_core::Recognizer;
use fourwayd::args::FourwaydArgs;
use fourwayd::config::Config;
use fourwayd::dumper::Dumper;
use fourwayd::frame_source::{FrameSource, PcapFileSource};
use fourwayd::{dispatcher, run};

fn main() -> Result<()> {
    let args = FourwaydArgs::parse();
    fourway_common::util::logger::init("fourwayd");

    let config: Config = args.into();
    info!("{config:?}");

    let mut dumper = match &config.pcap_out {
        Some(path) => Some(Dumper::create(path).with_context(|| format!("opening {path}"))?),
        None => None,
    };

    let mut owned_dispatcher = None;
    if !config.passive {
        if let Some(path) = &config.dispatcher_pipe {
            owned_dispatcher =
                Some(dispatcher::open(path).with_context(|| format!("opening {path}"))?);
        }
    }
    let mut dispatcher: Box<dyn fourway_core::Dispatcher> = match owned_dispatcher {
        Some(pipe) => Box::new(pipe),
        None => Box::new(fourway_core::NullDispatcher),
    };

    let mut recognizer = Recognizer::new(run::recognizer_config(&config));
    for target in &config.targets {
        recognizer.add_target(*target);
    }

    let mut source: Box<dyn FrameSource> = match &config.replay {
        Some(path) => {
            Box::new(PcapFileSource::open(path).with_context(|| format!("opening {path}"))?)
        }
        None => open_live_source(&config)?,
    };

    let stop = run::install_signal_handlers()?;
    run::drive(&mut recognizer, source.as_mut(), &mut dumper, dispatcher.as_mut(), &stop)
}

#[cfg(feature = "live-capture")]
fn open_live_source(config: &Config) -> Result<Box<dyn FrameSource>> {
    let interface = config
        .interface
        .as_deref()
        .context("--interface is required when not replaying from a pcap file")?;
    Ok(Box::new(
        fourwayd::frame_source::MonitorSource::open(interface)
            .map_err(|err| anyhow::anyhow!("{err}"))?,
    ))
}

#[cfg(not(feature = "live-capture"))]
fn open_live_source(_config: &Config) -> Result<Box<dyn FrameSource>> {
    bail!(
        "no --replay pcap file given and this build lacks the `live-capture` feature; \
         live monitor-mode capture is out of the recognizer's scope by default"
    )
}
