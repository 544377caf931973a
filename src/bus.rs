//! # System Bus
//!
//! A single address-decode table mapping every 16-bit address to exactly one
//! region:
//!
//! - a window onto an installed [`Device`] (internal RAM, program ROM, a
//!   peripheral register block), optionally mirrored across the region
//! - the processor-owned OAM DMA trigger register
//! - a declared unmapped hole, which fails with `BusError::Address`
//!
//! The table is built once with [`BusBuilder`] and is immutable afterwards:
//! device contents change, routing does not. Building fails if regions
//! overlap or leave any address uncovered.
//!
//! ## Console memory map ([`SystemBus::nes`])
//!
//! | Range         | Region                                        |
//! |---------------|-----------------------------------------------|
//! | `$0000-$1FFF` | 2KB internal RAM, mirrored every `$0800`      |
//! | `$2000-$3FFF` | graphics registers (8), mirrored every 8      |
//! | `$4000-$4013` | audio/IO registers                            |
//! | `$4014`       | OAM DMA trigger (write-only)                  |
//! | `$4015-$4017` | audio status and controller ports             |
//! | `$4018-$7FFF` | unmapped                                      |
//! | `$8000-$FFFF` | program ROM, read-only (16KB images mirrored) |

use std::ops::RangeInclusive;

use crate::devices::{Device, DmaSink, ProgramRom, RamDevice};
use crate::error::{Access, BusError, ConstructionError};
use crate::memory::MemoryBus;

/// CPU cycles the processor is stalled for by one OAM DMA transfer (not
/// counting the extra alignment cycle when started on an odd cycle).
pub const OAM_DMA_CYCLES: u32 = 513;

/// Address of the OAM DMA trigger register on the console.
pub const OAM_DMA_ADDR: u16 = 0x4014;

/// Handle to a device installed in a [`BusBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId(usize);

#[derive(Debug, Clone, Copy)]
enum Target {
    Device {
        id: usize,
        base_offset: u16,
        window: u16,
    },
    Dma {
        sink: usize,
    },
    Unmapped,
}

#[derive(Debug, Clone, Copy)]
struct Region {
    start: u16,
    end: u16,
    target: Target,
}

/// Builder for the bus decode table.
///
/// # Examples
///
/// ```rust
/// use nes_cpu::{BusBuilder, MemoryBus, ProgramRom, RamDevice};
///
/// let mut builder = BusBuilder::new();
/// let ram = builder.install(Box::new(RamDevice::new(0x0800)));
/// let rom = builder.install(Box::new(ProgramRom::new(vec![0xEA; 0x4000]).unwrap()));
///
/// builder
///     .map(0x0000..=0x1FFF, ram).unwrap()   // mirrored every 2KB
///     .map_unmapped(0x2000..=0x7FFF).unwrap()
///     .map(0x8000..=0xFFFF, rom).unwrap();  // 16KB image mirrored
///
/// let mut bus = builder.build().unwrap();
/// bus.write(0x0801, 0x42).unwrap();
/// assert_eq!(bus.read(0x0001).unwrap(), 0x42);
/// assert!(bus.write(0x8000, 0x00).is_err());
/// ```
#[derive(Default)]
pub struct BusBuilder {
    devices: Vec<Box<dyn Device>>,
    sinks: Vec<Box<dyn DmaSink>>,
    regions: Vec<Region>,
}

impl BusBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a device and returns its handle. The device is not reachable
    /// until one or more regions map it.
    pub fn install(&mut self, device: Box<dyn Device>) -> DeviceId {
        self.devices.push(device);
        DeviceId(self.devices.len() - 1)
    }

    /// Maps `range` onto the whole device, repeating the device's window
    /// across the range (mirroring) when the range is larger.
    pub fn map(
        &mut self,
        range: RangeInclusive<u16>,
        id: DeviceId,
    ) -> Result<&mut Self, ConstructionError> {
        let size = self.device_size(id)?;
        self.map_window(range, id, 0, size)
    }

    /// Maps `range` onto `window` device offsets starting at `base_offset`.
    /// Address `a` reaches offset `base_offset + (a - start) % window`.
    pub fn map_window(
        &mut self,
        range: RangeInclusive<u16>,
        id: DeviceId,
        base_offset: u16,
        window: u16,
    ) -> Result<&mut Self, ConstructionError> {
        let (start, end) = bounds(&range)?;
        let device_size = self.device_size(id)?;
        if window == 0 {
            return Err(ConstructionError::EmptyRange { start });
        }

        let span = u32::from(end - start) + 1;
        let last_offset = u32::from(base_offset) + span.min(u32::from(window)) - 1;
        if last_offset >= u32::from(device_size) {
            return Err(ConstructionError::Window {
                start,
                last_offset,
                device_size,
            });
        }

        self.push_region(Region {
            start,
            end,
            target: Target::Device {
                id: id.0,
                base_offset,
                window,
            },
        })
    }

    /// Maps the single-address OAM DMA trigger register. Writing page `$XX`
    /// copies `$XX00-$XXFF` from the bus into `sink`.
    pub fn map_dma(
        &mut self,
        addr: u16,
        sink: Box<dyn DmaSink>,
    ) -> Result<&mut Self, ConstructionError> {
        self.push_region(Region {
            start: addr,
            end: addr,
            target: Target::Dma {
                sink: self.sinks.len(),
            },
        })?;
        self.sinks.push(sink);
        Ok(self)
    }

    /// Declares `range` as unmapped: any access fails with `BusError::Address`.
    pub fn map_unmapped(
        &mut self,
        range: RangeInclusive<u16>,
    ) -> Result<&mut Self, ConstructionError> {
        let (start, end) = bounds(&range)?;
        self.push_region(Region {
            start,
            end,
            target: Target::Unmapped,
        })
    }

    /// Finalizes the decode table.
    ///
    /// # Errors
    ///
    /// `ConstructionError::Gap` if any address in `$0000-$FFFF` is not covered.
    pub fn build(mut self) -> Result<SystemBus, ConstructionError> {
        self.regions.sort_by_key(|region| region.start);

        let mut next: u32 = 0;
        for region in &self.regions {
            if u32::from(region.start) != next {
                return Err(ConstructionError::Gap {
                    address: next as u16,
                });
            }
            next = u32::from(region.end) + 1;
        }
        if next != 0x1_0000 {
            return Err(ConstructionError::Gap {
                address: next as u16,
            });
        }

        Ok(SystemBus {
            devices: self.devices,
            sinks: self.sinks,
            regions: self.regions,
            stall_cycles: 0,
        })
    }

    fn device_size(&self, id: DeviceId) -> Result<u16, ConstructionError> {
        let device = self
            .devices
            .get(id.0)
            .ok_or(ConstructionError::UnknownDevice { id: id.0 })?;
        Ok(device.size())
    }

    fn push_region(&mut self, region: Region) -> Result<&mut Self, ConstructionError> {
        if let Some(existing) = self
            .regions
            .iter()
            .find(|r| region.start <= r.end && r.start <= region.end)
        {
            return Err(ConstructionError::Overlap {
                start: region.start,
                end: region.end,
                existing_start: existing.start,
                existing_end: existing.end,
            });
        }
        self.regions.push(region);
        Ok(self)
    }
}

fn bounds(range: &RangeInclusive<u16>) -> Result<(u16, u16), ConstructionError> {
    let (start, end) = (*range.start(), *range.end());
    if start > end {
        return Err(ConstructionError::EmptyRange { start });
    }
    Ok((start, end))
}

/// Permissioned, memory-mapped bus shared by the processor and peripherals.
///
/// Every access is routed synchronously to exactly one region. Permission is
/// checked before the device is touched, so a rejected access never reaches
/// (or mutates) the device.
pub struct SystemBus {
    devices: Vec<Box<dyn Device>>,
    sinks: Vec<Box<dyn DmaSink>>,
    regions: Vec<Region>,
    stall_cycles: u32,
}

impl SystemBus {
    /// Builds the console memory map (see the module docs).
    ///
    /// `ppu` must expose at least 8 registers and `apu_io` at least 24; offset
    /// 0x14 of `apu_io` is never reached because `$4014` belongs to the DMA
    /// trigger, which feeds `oam`.
    pub fn nes(
        rom: ProgramRom,
        ppu: Box<dyn Device>,
        apu_io: Box<dyn Device>,
        oam: Box<dyn DmaSink>,
    ) -> Result<Self, ConstructionError> {
        let mut builder = BusBuilder::new();
        let ram = builder.install(Box::new(RamDevice::internal()));
        let ppu = builder.install(ppu);
        let apu_io = builder.install(apu_io);
        let rom = builder.install(Box::new(rom));

        builder
            .map(0x0000..=0x1FFF, ram)?
            .map_window(0x2000..=0x3FFF, ppu, 0, 8)?
            .map_window(0x4000..=0x4013, apu_io, 0x00, 0x14)?
            .map_dma(OAM_DMA_ADDR, oam)?
            .map_window(0x4015..=0x4017, apu_io, 0x15, 3)?
            .map_unmapped(0x4018..=0x7FFF)?
            .map(0x8000..=0xFFFF, rom)?;
        builder.build()
    }

    fn route(&self, addr: u16) -> (u16, Target) {
        // The table is total, so the partition point always lands on a region.
        let index = self.regions.partition_point(|region| region.end < addr);
        let region = self.regions[index];
        (region.start, region.target)
    }

    fn dma_transfer(&mut self, sink: usize, page: u8) -> Result<(), BusError> {
        let base = u16::from(page) << 8;
        let mut buffer = [0u8; 256];
        for (offset, byte) in buffer.iter_mut().enumerate() {
            *byte = self.read(base | offset as u16)?;
        }
        self.sinks[sink].receive_page(&buffer);
        self.stall_cycles += OAM_DMA_CYCLES;
        log::debug!("OAM DMA from ${:04X}", base);
        Ok(())
    }
}

impl MemoryBus for SystemBus {
    fn read(&mut self, addr: u16) -> Result<u8, BusError> {
        match self.route(addr) {
            (start, Target::Device { id, base_offset, window }) => {
                let offset = base_offset + (addr - start) % window;
                let device = &mut self.devices[id];
                if !device.permission(offset).readable() {
                    return Err(BusError::Permission {
                        address: addr,
                        access: Access::Read,
                    });
                }
                Ok(device.read(offset))
            }
            (_, Target::Dma { .. }) => Err(BusError::Permission {
                address: addr,
                access: Access::Read,
            }),
            (_, Target::Unmapped) => Err(BusError::Address { address: addr }),
        }
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        match self.route(addr) {
            (start, Target::Device { id, base_offset, window }) => {
                let offset = base_offset + (addr - start) % window;
                let device = &mut self.devices[id];
                if !device.permission(offset).writable() {
                    return Err(BusError::Permission {
                        address: addr,
                        access: Access::Write,
                    });
                }
                device.write(offset, value);
                Ok(())
            }
            (_, Target::Dma { sink }) => self.dma_transfer(sink, value),
            (_, Target::Unmapped) => Err(BusError::Address { address: addr }),
        }
    }

    fn irq_active(&self) -> bool {
        self.devices.iter().any(|device| device.irq_pending())
    }

    fn take_stall_cycles(&mut self) -> u32 {
        std::mem::take(&mut self.stall_cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{Permission, RegisterBlock};

    struct NullSink;

    impl DmaSink for NullSink {
        fn receive_page(&mut self, _page: &[u8; 256]) {}
    }

    fn nes_bus() -> SystemBus {
        let rom = ProgramRom::new(vec![0xEA; 0x4000]).unwrap();
        SystemBus::nes(
            rom,
            Box::new(RegisterBlock::ppu()),
            Box::new(RegisterBlock::apu_io()),
            Box::new(NullSink),
        )
        .unwrap()
    }

    #[test]
    fn test_internal_ram_mirrors() {
        let mut bus = nes_bus();
        bus.write(0x0042, 0x99).unwrap();

        assert_eq!(bus.read(0x0842), Ok(0x99));
        assert_eq!(bus.read(0x1042), Ok(0x99));
        assert_eq!(bus.read(0x1842), Ok(0x99));
    }

    #[test]
    fn test_ppu_registers_mirror_every_8() {
        let mut bus = nes_bus();
        bus.write(0x3FFE, 0x21).unwrap(); // mirror of $2006
        assert!(bus.read(0x2006).is_err()); // write-only

        bus.write(0x2007, 0x55).unwrap();
        assert_eq!(bus.read(0x3FFF), Ok(0x55));
    }

    #[test]
    fn test_unmapped_hole_is_address_error() {
        let mut bus = nes_bus();
        assert_eq!(bus.read(0x4018), Err(BusError::Address { address: 0x4018 }));
        assert_eq!(
            bus.write(0x6000, 0x00),
            Err(BusError::Address { address: 0x6000 })
        );
    }

    #[test]
    fn test_rom_mirrored_and_read_only() {
        let mut bus = nes_bus();
        assert_eq!(bus.read(0x8000), Ok(0xEA));
        assert_eq!(bus.read(0xC000), Ok(0xEA));
        assert_eq!(
            bus.write(0xC000, 0x00),
            Err(BusError::Permission {
                address: 0xC000,
                access: Access::Write
            })
        );
    }

    #[test]
    fn test_dma_trigger_is_write_only() {
        let mut bus = nes_bus();
        assert_eq!(
            bus.read(OAM_DMA_ADDR),
            Err(BusError::Permission {
                address: OAM_DMA_ADDR,
                access: Access::Read
            })
        );

        bus.write(OAM_DMA_ADDR, 0x02).unwrap();
        assert_eq!(bus.take_stall_cycles(), OAM_DMA_CYCLES);
        assert_eq!(bus.take_stall_cycles(), 0);
    }

    #[test]
    fn test_overlap_rejected() {
        let mut builder = BusBuilder::new();
        let ram = builder.install(Box::new(RamDevice::new(0x100)));
        builder.map(0x1000..=0x10FF, ram).unwrap();

        let err = builder.map(0x1080..=0x117F, ram).err();
        assert_eq!(
            err,
            Some(ConstructionError::Overlap {
                start: 0x1080,
                end: 0x117F,
                existing_start: 0x1000,
                existing_end: 0x10FF,
            })
        );
    }

    #[test]
    fn test_gaps_rejected() {
        let mut builder = BusBuilder::new();
        builder.map_unmapped(0x0000..=0x7FFF).unwrap();
        builder.map_unmapped(0x8001..=0xFFFF).unwrap();
        assert_eq!(
            builder.build().err(),
            Some(ConstructionError::Gap { address: 0x8000 })
        );

        let mut builder = BusBuilder::new();
        builder.map_unmapped(0x0000..=0xFFFE).unwrap();
        assert_eq!(
            builder.build().err(),
            Some(ConstructionError::Gap { address: 0xFFFF })
        );
    }

    #[test]
    fn test_window_beyond_device_rejected() {
        let mut builder = BusBuilder::new();
        let regs = builder.install(Box::new(RegisterBlock::new(&[Permission::ReadWrite; 4])));
        assert!(matches!(
            builder.map_window(0x2000..=0x2007, regs, 0, 8),
            Err(ConstructionError::Window { .. })
        ));
        assert!(matches!(
            builder.map_window(0x2000..=0x2007, regs, 0, 0),
            Err(ConstructionError::EmptyRange { start: 0x2000 })
        ));
    }

    #[test]
    fn test_unknown_device_rejected() {
        let mut other = BusBuilder::new();
        let foreign = other.install(Box::new(RamDevice::new(1)));
        other.install(Box::new(RamDevice::new(1)));
        let foreign_second = other.install(Box::new(RamDevice::new(1)));

        let mut builder = BusBuilder::new();
        assert_eq!(
            builder.map(0x0000..=0x0000, foreign).err(),
            Some(ConstructionError::UnknownDevice { id: 0 })
        );
        assert_eq!(
            builder.map(0x0000..=0x0000, foreign_second).err(),
            Some(ConstructionError::UnknownDevice { id: 2 })
        );
    }
}
