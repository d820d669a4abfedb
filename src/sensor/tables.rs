//! Static register tables.
//!
//! Mode tables program MIPI timing and a default PLL; the driver overrides
//! the lane and bit-depth dependent entries and reprograms geometry and PLL
//! afterwards.

use crate::sensor::table::{TABLE_WAIT, WAIT_MS, register_table};

register_table! {
    /// Manufacturer initialization sequence, played once after reset.
    pub static INITIAL = [
        (0x301A, 0x0210),
        (0x3EB6, 0x004D),
        (0x3EBC, 0xAA06),
        (0x3EC0, 0x1E02),
        (0x3EC2, 0x7700),
        (0x3EC4, 0x1C08),
        (0x3EC6, 0xEA44),
        (0x3EC8, 0x0F0F),
        (0x3ECA, 0x0F4A),
        (0x3ECC, 0x0706),
        (0x3ECE, 0x443B),
        (0x3ED0, 0x12F0),
        (0x3ED2, 0x0039),
        (0x3ED4, 0x862F),
        (0x3ED6, 0x4080),
        (0x3ED8, 0x0523),
        (0x3EDA, 0xF896),
        (0x3EDC, 0x508C),
        (0x3EDE, 0x5005),
        (0x316A, 0x8200),
        (0x316E, 0x8200),
        (0x316C, 0x8200),
        (0x3EF0, 0x414D),
        (0x3EF2, 0x0101),
        (0x3EF6, 0x0307),
        (0x3EFA, 0x0F0F),
        (0x3EFC, 0x0F0F),
        (0x3EFE, 0x0F0F),
        (0x3D00, 0x0446),
        (0x3D02, 0x4C66),
        (0x3D04, 0xFFFF),
        (0x3D06, 0xFFFF),
        (0x3D08, 0x5E40),
        (0x3D0A, 0x1146),
        (0x3D0C, 0x5D41),
        (0x3D0E, 0x1088),
        (0x3D10, 0x8342),
        (0x3D12, 0x00C0),
        (0x3D14, 0x5580),
        (0x3D16, 0x5B83),
        (0x3D18, 0x6084),
        (0x3D1A, 0x5A8D),
        (0x3D1C, 0x00C0),
        (0x3D1E, 0x8342),
        (0x3D20, 0x925A),
        (0x3D22, 0x8664),
        (0x3D24, 0x1030),
        (0x3D26, 0x801C),
        (0x3D28, 0x00A0),
        (0x3D2A, 0x56B0),
        (0x3D2C, 0x5788),
        (0x3D2E, 0x5150),
        (0x3D30, 0x824D),
        (0x3D32, 0x8D58),
        (0x3D34, 0x58D2),
        (0x3D36, 0x438A),
        (0x3D38, 0x4592),
        (0x3D3A, 0x458A),
        (0x3D3C, 0x4389),
        (0x3D3E, 0x51FF),
        (0x3D40, 0x8451),
        (0x3D42, 0x8410),
        (0x3D44, 0x0C88),
        (0x3D46, 0x5959),
        (0x3D48, 0x8A5F),
        (0x3D4A, 0xDA42),
        (0x3D4C, 0x9361),
        (0x3D4E, 0x8262),
        (0x3D50, 0x8342),
        (0x3D52, 0x8010),
        (0x3D54, 0xC041),
        (0x3D56, 0x64FF),
        (0x3D58, 0xFFB7),
        (0x3D5A, 0x4081),
        (0x3D5C, 0x4080),
        (0x3D5E, 0x4180),
        (0x3D60, 0x4280),
        (0x3D62, 0x438D),
        (0x3D64, 0x44BA),
        (0x3D66, 0x4488),
        (0x3D68, 0x4380),
        (0x3D6A, 0x4241),
        (0x3D6C, 0x8140),
        (0x3D6E, 0x8240),
        (0x3D70, 0x8041),
        (0x3D72, 0x8042),
        (0x3D74, 0x8043),
        (0x3D76, 0x8D44),
        (0x3D78, 0xBA44),
        (0x3D7A, 0x875E),
        (0x3D7C, 0x4354),
        (0x3D7E, 0x4241),
        (0x3D80, 0x8140),
        (0x3D82, 0x8120),
        (0x3D84, 0x2881),
        (0x3D86, 0x6026),
        (0x3D88, 0x8055),
        (0x3D8A, 0x8070),
        (0x3D8C, 0x8040),
        (0x3D8E, 0x4C81),
        (0x3D90, 0x45C3),
        (0x3D92, 0x4581),
        (0x3D94, 0x4C40),
        (0x3D96, 0x8070),
        (0x3D98, 0x8040),
        (0x3D9A, 0x4C85),
        (0x3D9C, 0x6CA8),
        (0x3D9E, 0x6C8C),
        (0x3DA0, 0x000E),
        (0x3DA2, 0xBE44),
        (0x3DA4, 0x8844),
        (0x3DA6, 0xBC78),
        (0x3DA8, 0x0900),
        (0x3DAA, 0x8904),
        (0x3DAC, 0x8080),
        (0x3DAE, 0x0240),
        (0x3DB0, 0x8609),
        (0x3DB2, 0x008E),
        (0x3DB4, 0x0900),
        (0x3DB6, 0x8002),
        (0x3DB8, 0x4080),
        (0x3DBA, 0x0480),
        (0x3DBC, 0x887C),
        (0x3DBE, 0xAA86),
        (0x3DC0, 0x0900),
        (0x3DC2, 0x877A),
        (0x3DC4, 0x000E),
        (0x3DC6, 0xC379),
        (0x3DC8, 0x4C40),
        (0x3DCA, 0xBF70),
        (0x3DCC, 0x5E40),
        (0x3DCE, 0x114E),
        (0x3DD0, 0x5D41),
        (0x3DD2, 0x5383),
        (0x3DD4, 0x4200),
        (0x3DD6, 0xC055),
        (0x3DD8, 0xA400),
        (0x3DDA, 0xC083),
        (0x3DDC, 0x4288),
        (0x3DDE, 0x6083),
        (0x3DE0, 0x5B80),
        (0x3DE2, 0x5A64),
        (0x3DE4, 0x1030),
        (0x3DE6, 0x801C),
        (0x3DE8, 0x00A5),
        (0x3DEA, 0x5697),
        (0x3DEC, 0x57A5),
        (0x3DEE, 0x5180),
        (0x3DF0, 0x505A),
        (0x3DF2, 0x814D),
        (0x3DF4, 0x8358),
        (0x3DF6, 0x8058),
        (0x3DF8, 0xA943),
        (0x3DFA, 0x8345),
        (0x3DFC, 0xB045),
        (0x3DFE, 0x8343),
        (0x3E00, 0xA351),
        (0x3E02, 0xE251),
        (0x3E04, 0x8C59),
        (0x3E06, 0x8059),
        (0x3E08, 0x8A5F),
        (0x3E0A, 0xEC7C),
        (0x3E0C, 0xCC84),
        (0x3E0E, 0x6182),
        (0x3E10, 0x6283),
        (0x3E12, 0x4283),
        (0x3E14, 0x10CC),
        (0x3E16, 0x6496),
        (0x3E18, 0x4281),
        (0x3E1A, 0x41BB),
        (0x3E1C, 0x4082),
        (0x3E1E, 0x407E),
        (0x3E20, 0xCC41),
        (0x3E22, 0x8042),
        (0x3E24, 0x8043),
        (0x3E26, 0x8300),
        (0x3E28, 0xC088),
        (0x3E2A, 0x44BA),
        (0x3E2C, 0x4488),
        (0x3E2E, 0x00C8),
        (0x3E30, 0x8042),
        (0x3E32, 0x4181),
        (0x3E34, 0x4082),
        (0x3E36, 0x4080),
        (0x3E38, 0x4180),
        (0x3E3A, 0x4280),
        (0x3E3C, 0x4383),
        (0x3E3E, 0x00C0),
        (0x3E40, 0x8844),
        (0x3E42, 0xBA44),
        (0x3E44, 0x8800),
        (0x3E46, 0xC880),
        (0x3E48, 0x4241),
        (0x3E4A, 0x8240),
        (0x3E4C, 0x8140),
        (0x3E4E, 0x8041),
        (0x3E50, 0x8042),
        (0x3E52, 0x8043),
        (0x3E54, 0x8300),
        (0x3E56, 0xC088),
        (0x3E58, 0x44BA),
        (0x3E5A, 0x4488),
        (0x3E5C, 0x00C8),
        (0x3E5E, 0x8042),
        (0x3E60, 0x4181),
        (0x3E62, 0x4082),
        (0x3E64, 0x4080),
        (0x3E66, 0x4180),
        (0x3E68, 0x4280),
        (0x3E6A, 0x4383),
        (0x3E6C, 0x00C0),
        (0x3E6E, 0x8844),
        (0x3E70, 0xBA44),
        (0x3E72, 0x8800),
        (0x3E74, 0xC880),
        (0x3E76, 0x4241),
        (0x3E78, 0x8140),
        (0x3E7A, 0x9F5E),
        (0x3E7C, 0x8A54),
        (0x3E7E, 0x8620),
        (0x3E80, 0x2881),
        (0x3E82, 0x6026),
        (0x3E84, 0x8055),
        (0x3E86, 0x8070),
        (0x3E88, 0x0000),
        (0x3E8A, 0x0000),
        (0x3E8C, 0x0000),
        (0x3E8E, 0x0000),
        (0x3E90, 0x0000),
        (0x3E92, 0x0000),
        (0x3E94, 0x0000),
        (0x3E96, 0x0000),
        (0x3E98, 0x0000),
        (0x3E9A, 0x0000),
        (0x3E9C, 0x0000),
        (0x3E9E, 0x0000),
        (0x3EA0, 0x0000),
        (0x3EA2, 0x0000),
        (0x3EA4, 0x0000),
        (0x3EA6, 0x0000),
        (0x3EA8, 0x0000),
        (0x3EAA, 0x0000),
        (0x3EAC, 0x0000),
        (0x3EAE, 0x0000),
        (0x3EB0, 0x0000),
        (0x3EB2, 0x0000),
        (0x3EB4, 0x0000),
    ];
}

register_table! {
    /// Enables on-chip defect pixel correction.
    pub static DEFECT_CORRECTION = [
        (0x31E0, 0x0781),
        (0x3F00, 0x004F),
        (0x3F02, 0x0125),
        (0x3F04, 0x0020),
        (0x3F06, 0x0040),
        (0x3F08, 0x0070),
        (0x3F0A, 0x0101),
        (0x3F0C, 0x0302),
        (0x3F1E, 0x0022),
        (0x3F1A, 0x01FF),
        (0x3F14, 0x0101),
        (0x3F44, 0x0707),
        (0x3F18, 0x011E),
        (0x3F12, 0x0303),
        (0x3F42, 0x1511),
        (0x3F16, 0x011E),
        (0x3F10, 0x0505),
        (0x3F40, 0x1511),
    ];
}

register_table! {
    /// Switches to HDR readout.
    pub static HDR_ON = [
        (0x317A, 0x416E),
        (0x0400, 0x0000),
        (0x3EFA, 0x070F),
        (0x3EFC, 0x070F),
        (0x31E0, 0x0091),
        (0x316C, 0x8400),
        (0x303E, 0x0001),
        (0x3012, 0x0960),
        (0x3088, 0x012C),
        (0x305E, 0x2013),
        (TABLE_WAIT, WAIT_MS),
    ];
}

register_table! {
    /// Returns to linear readout.
    pub static HDR_OFF = [
        (0x3EFA, 0x0F0F),
        (0x3EFC, 0x0F0F),
        (0x31E0, 0x0781),
        (0x316C, 0x8200),
        (0x303E, 0x0000),
        (0x305E, 0x2010),
        (TABLE_WAIT, WAIT_MS),
    ];
}

register_table! {
    /// Holds the MIPI lanes in LP-11 while the sensor restarts.
    pub static LP11_PRESTREAM = [
        (0x31C6, 0x0080),
        (0x301A, 0x023A),
        (TABLE_WAIT, 1),
        (0x31C6, 0x0000),
    ];
}

register_table! {
    /// Last write enables streaming.
    pub static START_STREAM = [
        (0x3F3C, 0x0003),
        (0x301A, 0x023C),
    ];
}

register_table! {
    /// Returns the sensor to standby.
    pub static STOP_STREAM = [
        (0x3F3C, 0x0002),
        (0x301A, 0x0210),
    ];
}

register_table! {
    /// 1280x720 at 60 fps.
    pub static MODE_1280X720_60 = [
        (0x31B0, 0x004D),
        (0x31B2, 0x0028),
        (0x31B4, 0x230E),
        (0x31B6, 0x1348),
        (0x31B8, 0x1C12),
        (0x31BA, 0x185B),
        (0x31BC, 0x8509),
        (0x31AE, 0x0204),
        (0x3024, 0x0001),
        (0x0300, 0x0004),
        (0x0302, 0x0001),
        (0x0304, 0x0303),
        (0x0306, 0x3737),
        (0x0308, 0x000A),
        (0x030A, 0x0001),
        (0x0112, 0x0A0A),
        (0x3016, 0x0101),
        (TABLE_WAIT, WAIT_MS),
    ];
}

register_table! {
    /// 1920x1080 at 30 fps.
    pub static MODE_1920X1080_30 = [
        (0x31B0, 0x004D),
        (0x31B2, 0x0028),
        (0x31B4, 0x230E),
        (0x31B6, 0x1348),
        (0x31B8, 0x1C12),
        (0x31BA, 0x185B),
        (0x31BC, 0x8509),
        (0x31AE, 0x0204),
        (0x3024, 0x0001),
        (0x0300, 0x0004),
        (0x0302, 0x0001),
        (0x0304, 0x0303),
        (0x0306, 0x3737),
        (0x0308, 0x000A),
        (0x030A, 0x0001),
        (0x0112, 0x0A0A),
        (0x3016, 0x0101),
        (TABLE_WAIT, WAIT_MS),
        (0x0342, 0x1230),
        (0x0340, 0x0C4E),
        (0x3040, 0x4041),
        (0x3172, 0x0206),
        (0x317A, 0x516E),
        (0x3F3C, 0x0003),
        (0x0400, 0x0001),
        (0x0404, 0x0010),
        (0x0202, 0x0C2E),
    ];
}

register_table! {
    /// 3840x2160 at 30 fps.
    pub static MODE_3840X2160_30 = [
        (0x31B0, 0x0086),
        (0x31B2, 0x0057),
        (0x31B4, 0x2412),
        (0x31B6, 0x142A),
        (0x31B8, 0x2413),
        (0x31BA, 0x1C70),
        (0x31BC, 0x068B),
        (0x31AE, 0x0204),
        (0x0300, 0x0004),
        (0x0302, 0x0001),
        (0x0304, 0x0903),
        (0x0306, 0xCF37),
        (0x0308, 0x000A),
        (0x030A, 0x0001),
        (0x0112, 0x0A0A),
        (0x3016, 0x0101),
        (TABLE_WAIT, WAIT_MS),
        (0x0342, 0x1230),
        (0x0340, 0x0C4E),
        (0x3040, 0x4041),
        (0x3172, 0x0206),
        (0x317A, 0x416E),
        (0x3F3C, 0x0003),
        (0x0400, 0x0000),
        (0x0404, 0x0010),
        (0x0202, 0x0C2E),
    ];
}

register_table! {
    /// Full array at 30 fps.
    pub static MODE_4208X3120_30 = [
        (0x31B0, 0x005C),
        (0x31B2, 0x002D),
        (0x31B4, 0x2412),
        (0x31B6, 0x142A),
        (0x31B8, 0x2413),
        (0x31BA, 0x1C70),
        (0x31BC, 0x868B),
        (0x31AE, 0x0204),
        (0x0300, 0x0005),
        (0x0302, 0x0001),
        (0x0304, 0x0101),
        (0x0306, 0x2E2E),
        (0x0308, 0x000A),
        (0x030A, 0x0001),
        (0x0112, 0x0A0A),
        (0x3016, 0x0101),
        (TABLE_WAIT, WAIT_MS),
        (0x0342, 0x1240),
        (0x0340, 0x0C4E),
    ];
}
