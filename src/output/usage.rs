//! Usage text

use std::io::{self, Write};

const USAGE: &str = "\
Usage: locip [options] [target]

Looks up geolocation information for IP addresses using a local GeoLite2 database, ipinfo.io, or AbuseIPDB.

Options:
  -i [ip_address]   Query ipinfo.io for the given IP address (or your public IP if none provided).
                    Displays detailed information including city, region, country, location, etc.
  -a <ip_address>   Query AbuseIPDB for abuse information about the given IP address.
                    Options: --age <days> (default: 90), --raw (JSON output)
                    The key is read from $ABUSEIPDB_KEY, ~/.config/abuseipdb/key or ~/.abuseipdb_key.
  -h, --help        Show this help.
  -V, --version     Show the version.

Targets (Uses local GeoLite2 Database):
  <ip_address>      Show full geolocation details (city, region, country, lat/long) for the given IP address.
  <filepath>        Process a file containing a list of IP addresses (one per line).
                    For each IP, shows city, region, and country.

Default Behavior (Uses local GeoLite2 Database):
  If no arguments are provided, locip reads and processes 'ips.txt'
  from the current directory. It expects one IP address per line and will show
  city, region, and country for each.

Examples:
  locip -i 8.8.8.8                  # Query ipinfo.io for 8.8.8.8
  locip -i                          # Query ipinfo.io for your public IP
  locip -a 1.2.3.4                  # Query AbuseIPDB for 1.2.3.4
  locip -a 1.2.3.4 --age 30 --raw   # Query with custom age and raw JSON output
  locip 1.1.1.1                     # Use local DB for full details of 1.1.1.1
  locip my_ip_list.txt              # Use local DB to process IPs in my_ip_list.txt
  locip                             # Use local DB to process IPs in ips.txt (if it exists)
";

/// Write the usage text
pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(USAGE.as_bytes())
}
