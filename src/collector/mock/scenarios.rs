//! Pre-built mock hosts for testing.
//!
//! These scenarios provide realistic `/proc`, `/sys` and command-output
//! states for the Linux and Windows collectors.

use super::commands::MockCommands;
use super::filesystem::MockFs;

impl MockFs {
    /// Creates a typical Linux server.
    ///
    /// Includes: hostname `build-01`, a Ryzen CPU, `eth0` as default route
    /// next to `wlan0`, `docker0` and loopback, and a handful of listening
    /// sockets (sshd, cupsd, postgres, a dev server on IPv6).
    pub fn linux_host() -> Self {
        let mut fs = Self::new();

        fs.add_file("/proc/sys/kernel/hostname", "build-01\n");
        fs.add_file(
            "/proc/cpuinfo",
            "\
processor\t: 0
vendor_id\t: AuthenticAMD
cpu family\t: 25
model\t\t: 33
model name\t: AMD Ryzen 7 5800X 8-Core Processor
cpu MHz\t\t: 3800.000

processor\t: 1
vendor_id\t: AuthenticAMD
model name\t: AMD Ryzen 7 5800X 8-Core Processor
",
        );
        fs.add_file(
            "/proc/net/route",
            "\
Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT
eth0\t00000000\t0101A8C0\t0003\t0\t0\t100\t00000000\t0\t0\t0
eth0\t0001A8C0\t00000000\t0001\t0\t0\t100\t00FFFFFF\t0\t0\t0
docker0\t000011AC\t00000000\t0001\t0\t0\t0\t0000FFFF\t0\t0\t0
",
        );
        fs.add_file(
            "/proc/net/tcp",
            "\
  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
   0: 00000000:0016 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 21345 1 0000000000000000 100 0 0 10 0
   1: 0100007F:0277 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 23456 1 0000000000000000 100 0 0 10 0
   2: 0100007F:1538 00000000:0000 0A 00000000:00000000 00:00000000 00000000   112        0 24567 1 0000000000000000 100 0 0 10 0
   3: 6400A8C0:0016 0A00A8C0:D3A2 01 00000000:00000000 02:0009C7A1 00000000     0        0 34567 2 0000000000000000 20 4 30 10 -1
",
        );
        fs.add_file(
            "/proc/net/tcp6",
            "\
  sl  local_address                         remote_address                        st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
   0: 00000000000000000000000000000000:0016 00000000000000000000000000000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 21347 1 0000000000000000 100 0 0 10 0
   1: 00000000000000000000000000000000:1F90 00000000000000000000000000000000:0000 0A 00000000:00000000 00:00000000 00000000  1000        0 45678 1 0000000000000000 100 0 0 10 0
",
        );

        fs.add_interface("lo", "00:00:00:00:00:00");
        fs.add_interface("eth0", "52:54:00:12:34:56");
        fs.add_interface("wlan0", "a4:c3:f0:11:22:33");
        fs.add_interface("docker0", "02:42:ac:11:00:01");

        fs
    }
}

impl MockCommands {
    /// Creates the command output of a typical Windows workstation.
    ///
    /// Includes: an Intel CPU from `Win32_Processor`, `getmac` listing a
    /// disconnected adapter before the active one, and `netstat` output
    /// with RPC, SMB and an IPv6 listener.
    pub fn windows_host() -> Self {
        let mut commands = Self::new();

        commands.add_output(
            "powershell",
            &crate::collector::windows::PROCESSOR_QUERY,
            "Intel(R) Core(TM) i7-14650HX\r\n",
        );
        commands.add_output(
            "getmac",
            &crate::collector::windows::GETMAC_ARGS,
            "\
\"N/A\",\"Media disconnected\"\r
\"34-5A-60-22-18-B2\",\"\\Device\\Tcpip_{4D36E972-E325-11CE-BFC1-08002BE10318}\"\r
\"0A-00-27-00-00-0C\",\"\\Device\\Tcpip_{9B1C2A55-0F6E-4B7E-9D0B-2C6D1E8F3A10}\"\r
",
        );
        commands.add_output(
            "netstat",
            &crate::collector::windows::NETSTAT_TCP_ARGS,
            "\
\r
Active Connections\r
\r
  Proto  Local Address          Foreign Address        State\r
  TCP    0.0.0.0:135            0.0.0.0:0              LISTENING\r
  TCP    0.0.0.0:445            0.0.0.0:0              LISTENING\r
  TCP    127.0.0.1:5939         0.0.0.0:0              LISTENING\r
  TCP    192.168.1.102:49832    140.82.112.25:443      ESTABLISHED\r
",
        );
        commands.add_output(
            "netstat",
            &crate::collector::windows::NETSTAT_TCP6_ARGS,
            "\
\r
Active Connections\r
\r
  Proto  Local Address          Foreign Address        State\r
  TCP    [::]:135               [::]:0                 LISTENING\r
  TCP    [::]:7680              [::]:0                 LISTENING\r
",
        );

        commands
    }
}
